//! Transfer-channel framing.
//!
//! # Wire format
//!
//! ```text
//! DATA (worker -> requester):  [raw file bytes, chunked arbitrarily]
//! END MARKER:                  [7 bytes: <<EOF>>] as its own trailing write
//! ACK (requester -> worker):   [FTCP_ACK] or [FTCP_ACK,<decimal byte count>]
//! ```
//!
//! The marker may straddle read boundaries, so the receiver resumes its scan
//! a marker-length back from the previous read. The marker bytes occurring
//! inside genuine file content are a known limitation of this wire format:
//! the stream truncates at the first occurrence.

use ftcp_protocol::{Ack, EOF_MARKER};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::{CHUNK_SIZE, TransferError};

/// Largest acknowledgment the worker will buffer.
const ACK_BUFFER_CAP: usize = 64;

/// Writes the end-of-stream marker as a standalone write and flushes.
pub async fn write_eof_marker<W: AsyncWrite + Unpin>(writer: &mut W) -> Result<(), TransferError> {
    writer.write_all(EOF_MARKER).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads until the end-of-stream marker, returning the payload bytes.
///
/// Bytes after the marker are discarded. Connection close before the marker
/// is reported as [`TransferError::Truncated`], never silently accepted.
pub async fn read_until_eof<R: AsyncRead + Unpin>(
    reader: &mut R,
) -> Result<Vec<u8>, TransferError> {
    let mut data = Vec::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            return Err(TransferError::Truncated {
                received: data.len() as u64,
            });
        }
        // Resume the scan far enough back to catch a marker split across reads.
        let scan_from = data.len().saturating_sub(EOF_MARKER.len() - 1);
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = find_marker(&data[scan_from..]) {
            data.truncate(scan_from + pos);
            return Ok(data);
        }
    }
}

fn find_marker(haystack: &[u8]) -> Option<usize> {
    haystack
        .windows(EOF_MARKER.len())
        .position(|window| window == EOF_MARKER)
}

/// Writes an acknowledgment and flushes.
pub async fn write_ack<W: AsyncWrite + Unpin>(
    writer: &mut W,
    ack: &Ack,
) -> Result<(), TransferError> {
    writer.write_all(ack.encode().as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Reads an acknowledgment, accumulating until the peer closes the
/// connection or the small ACK buffer fills.
pub async fn read_ack<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Ack, TransferError> {
    let mut data = Vec::new();
    let mut buf = [0u8; ACK_BUFFER_CAP];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buf[..n]);
        if data.len() >= ACK_BUFFER_CAP {
            break;
        }
    }
    let text = String::from_utf8_lossy(&data);
    Ok(Ack::parse(&text)?)
}
