//! Line-delimited JSON framing over any byte stream.

use std::io::{BufRead, Write};

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    errors::Error,
    protocol::{ClientMessage, HostMessage},
    session::VoiceControlSession,
};

pub struct MessageReader<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> MessageReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }

    /// Next message, `Ok(None)` at end of stream. Blank lines are skipped.
    ///
    /// A line that is not a valid message is reported as an error; the
    /// reader stays usable and continues with the following line.
    pub fn read<T: DeserializeOwned>(&mut self) -> Result<Option<T>, Error> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            let line = self.line.trim();
            if line.is_empty() {
                continue;
            }
            return Ok(Some(serde_json::from_str(line)?));
        }
    }
}

pub struct MessageWriter<W> {
    writer: W,
}

impl<W: Write> MessageWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write<T: Serialize>(&mut self, message: &T) -> Result<(), Error> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Feeds host messages to the session until the stream ends, writing every
/// reply. A line that does not parse is answered with a configuration error
/// and skipped; I/O errors end the loop.
pub fn serve<R: BufRead, W: Write>(
    session: &mut VoiceControlSession,
    reader: R,
    writer: W,
) -> Result<(), Error> {
    let mut reader = MessageReader::new(reader);
    let mut writer = MessageWriter::new(writer);
    loop {
        let replies = match reader.read::<HostMessage>() {
            Ok(Some(message)) => session.handle(message),
            Ok(None) => break,
            Err(err @ Error::SerdeJson(_)) => {
                log::warn!("Rejecting host message: {err}");
                vec![ClientMessage::configuration_error(&err)]
            }
            Err(err) => return Err(err),
        };
        for reply in replies {
            if let ClientMessage::Result(result) = &reply {
                log::debug!("{} -> {:?}", result.message, result.to_command());
            }
            writer.write(&reply)?;
        }
    }
    log::info!("Host closed the connection");
    Ok(())
}
