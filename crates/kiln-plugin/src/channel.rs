//! The message channel a plugin talks to its host over.
//!
//! The channel moves whole, already-framed protocol messages; it knows
//! nothing about request/reply pairing, which is the proxy's discipline.
//! [`MessageChannel`] is the consumed interface; [`FramedChannel`] is the
//! shipped implementation over the duplex pipe pair the kiln host binds to
//! a plugin process at startup.

use kiln_plugin_proto::{write_frame, Request, Response, MAX_FRAME_SIZE};
use std::io::{self, Read, Write};
use thiserror::Error;

/// Transport failure on the plugin channel.
///
/// These are fatal to the in-flight call and never retried at this layer.
#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("channel I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("malformed message frame: {0}")]
    MalformedFrame(#[source] serde_json::Error),

    #[error("message frame too large: {0} bytes")]
    FrameTooLarge(usize),
}

/// Duplex transport carrying protocol messages between plugin and host.
///
/// Implementations do not multiplex and carry no message ids; correct
/// reply-to-request pairing is enforced above this trait.
pub trait MessageChannel {
    /// Transmit one fully-framed request.
    ///
    /// # Errors
    /// Fails if the channel is severed or the peer is gone.
    fn send_message(&mut self, message: &Request) -> Result<(), ChannelError>;

    /// Block until one full message arrives.
    ///
    /// Returns `Ok(None)` on clean channel closure.
    ///
    /// # Errors
    /// Fails on I/O failure or malformed/truncated data.
    fn wait_for_next_message(&mut self) -> Result<Option<Response>, ChannelError>;
}

/// Blocking channel over a `Read`/`Write` pair, using length-prefixed JSON
/// frames (see `kiln-plugin-proto` for the format).
#[derive(Debug)]
pub struct FramedChannel<R, W> {
    reader: R,
    writer: W,
}

impl FramedChannel<io::Stdin, io::Stdout> {
    /// Bind the pipe pair the kiln host wires to the plugin's stdio.
    #[must_use]
    pub fn over_stdio() -> Self {
        Self::new(io::stdin(), io::stdout())
    }
}

impl<R: Read, W: Write> FramedChannel<R, W> {
    #[must_use]
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl<R: Read, W: Write> MessageChannel for FramedChannel<R, W> {
    fn send_message(&mut self, message: &Request) -> Result<(), ChannelError> {
        write_frame(&mut self.writer, message)?;
        Ok(())
    }

    fn wait_for_next_message(&mut self) -> Result<Option<Response>, ChannelError> {
        let mut len_buf = [0u8; 4];

        // EOF before the first prefix byte is a clean closure; EOF anywhere
        // after it is a truncated frame.
        if self.reader.read(&mut len_buf[..1])? == 0 {
            return Ok(None);
        }
        self.reader.read_exact(&mut len_buf[1..])?;

        let len = u32::from_le_bytes(len_buf) as usize;
        if len > MAX_FRAME_SIZE {
            return Err(ChannelError::FrameTooLarge(len));
        }

        let mut buf = vec![0u8; len];
        self.reader.read_exact(&mut buf)?;

        serde_json::from_slice(&buf)
            .map(Some)
            .map_err(ChannelError::MalformedFrame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_plugin_proto::{encode_frame, read_frame, TestParameters, TestSubset};
    use std::io::Cursor;

    fn framed(bytes: Vec<u8>) -> FramedChannel<Cursor<Vec<u8>>, io::Sink> {
        FramedChannel::new(Cursor::new(bytes), io::sink())
    }

    #[test]
    fn test_send_writes_one_decodable_frame() {
        let request = Request::TestOperation {
            subset: TestSubset::All,
            parameters: TestParameters {
                enable_code_coverage: false,
            },
        };

        let mut out = Vec::new();
        let mut channel = FramedChannel::new(io::empty(), &mut out);
        channel.send_message(&request).unwrap();
        drop(channel);

        let decoded: Request = read_frame(&mut Cursor::new(out)).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_wait_returns_message() {
        let reply = Response::error("busy");
        let mut channel = framed(encode_frame(&reply).unwrap());

        let received = channel.wait_for_next_message().unwrap();
        assert_eq!(received, Some(reply));
    }

    #[test]
    fn test_clean_closure_returns_none() {
        let mut channel = framed(Vec::new());
        assert!(channel.wait_for_next_message().unwrap().is_none());
    }

    #[test]
    fn test_eof_inside_frame_is_an_error() {
        let mut bytes = encode_frame(&Response::error("boom")).unwrap();
        bytes.truncate(bytes.len() - 3);
        let mut channel = framed(bytes);

        match channel.wait_for_next_message() {
            Err(ChannelError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_eof_inside_length_prefix_is_an_error() {
        let mut channel = framed(vec![0x10, 0x00]);
        assert!(matches!(
            channel.wait_for_next_message(),
            Err(ChannelError::Io(_))
        ));
    }

    #[test]
    fn test_oversized_frame_is_rejected_before_reading() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        let mut channel = framed(bytes);

        match channel.wait_for_next_message() {
            Err(ChannelError::FrameTooLarge(len)) => assert_eq!(len, u32::MAX as usize),
            other => panic!("expected FrameTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_payload_is_an_error() {
        let payload = b"this is not json";
        let mut bytes = Vec::new();
        #[allow(clippy::cast_possible_truncation)]
        let len = payload.len() as u32;
        bytes.extend_from_slice(&len.to_le_bytes());
        bytes.extend_from_slice(payload);
        let mut channel = framed(bytes);

        assert!(matches!(
            channel.wait_for_next_message(),
            Err(ChannelError::MalformedFrame(_))
        ));
    }
}
