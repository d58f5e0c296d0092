//! The `RpcLogger` trait, the sink for debug request/response records.

/// A line-write capability.
pub trait RpcLogger: Send + Sync + 'static {
    /// Write one record. A record may span several lines but is one write.
    fn log_line(&self, line: &str);
}

/// Default logger: forwards records to `tracing` under `ethrpc::debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl RpcLogger for TracingLogger {
    fn log_line(&self, line: &str) {
        tracing::info!(target: "ethrpc::debug", "{line}");
    }
}

impl<F> RpcLogger for F
where
    F: Fn(&str) + Send + Sync + 'static,
{
    fn log_line(&self, line: &str) {
        self(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn closure_is_a_logger() {
        let lines = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = lines.clone();
        let logger = move |line: &str| sink.lock().unwrap().push(line.to_string());

        logger.log_line("one");
        logger.log_line("two\nthree");

        assert_eq!(*lines.lock().unwrap(), vec!["one", "two\nthree"]);
    }
}
