use super::{LocalSink, SinkError};
use parking_lot::Mutex;
use serde_json::Value;
use std::io::{self, Stderr, Stdout, Write};

/// Console-equivalent sink: info goes to `out`, errors go to `err`.
///
/// Messages are written as-is, one per line. Data passed with an info
/// message follows it after a single space as compact JSON.
#[derive(Debug)]
pub struct ConsoleSink<O = Stdout, E = Stderr> {
    out: Mutex<O>,
    err: Mutex<E>,
}

impl ConsoleSink {
    /// Binds the process's standard output and standard error.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::stdio()
    }
}

impl<O, E> ConsoleSink<O, E>
where
    O: Write + Send,
    E: Write + Send,
{
    pub fn new(out: O, err: E) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out.into_inner(), self.err.into_inner())
    }
}

impl<O, E> LocalSink for ConsoleSink<O, E>
where
    O: Write + Send,
    E: Write + Send,
{
    fn info(&self, message: &str, data: Option<&Value>) -> Result<(), SinkError> {
        let mut out = self.out.lock();
        match data {
            Some(data) => writeln!(out, "{message} {data}")?,
            None => writeln!(out, "{message}")?,
        }
        out.flush()?;
        Ok(())
    }

    fn error(&self, message: &str) -> Result<(), SinkError> {
        let mut err = self.err.lock();
        writeln!(err, "{message}")?;
        err.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sink() -> ConsoleSink<Vec<u8>, Vec<u8>> {
        ConsoleSink::new(Vec::new(), Vec::new())
    }

    #[test]
    fn test_info_passes_message_through_to_out() {
        let sink = sink();
        sink.info("(abc) Message", None).unwrap();

        let (out, err) = sink.into_inner();
        assert_eq!(String::from_utf8(out).unwrap(), "(abc) Message\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_info_appends_data() {
        let sink = sink();
        sink.info("Message", Some(&json!({ "data": "data" }))).unwrap();

        let (out, _) = sink.into_inner();
        assert_eq!(String::from_utf8(out).unwrap(), "Message {\"data\":\"data\"}\n");
    }

    #[test]
    fn test_error_passes_message_through_to_err() {
        let sink = sink();
        sink.error("Failure").unwrap();

        let (out, err) = sink.into_inner();
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), "Failure\n");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_failure_propagates() {
        let sink = ConsoleSink::new(BrokenPipe, BrokenPipe);

        assert!(matches!(sink.info("Message", None), Err(SinkError::Write(_))));
        assert!(matches!(sink.error("Message"), Err(SinkError::Write(_))));
    }
}
