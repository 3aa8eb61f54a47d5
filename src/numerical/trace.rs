//! Where trace lines go once the solver has produced them.
//!
//! The solver only ever produces strings; a [`TraceSink`] decides how to show them.
use log::info;

pub trait TraceSink {
    fn emit(&mut self, line: &str);
}

/// prints every line to stdout, the way the step-by-step walkthrough is meant to be read
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl TraceSink for ConsoleSink {
    fn emit(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// forwards every line to the `log` facade at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl TraceSink for LogSink {
    fn emit(&mut self, line: &str) {
        info!("{}", line);
    }
}

impl TraceSink for Vec<String> {
    fn emit(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_collects_lines() {
        let mut sink: Vec<String> = Vec::new();
        sink.emit("Step #1:");
        sink.emit("x = (a+b)/2");
        assert_eq!(sink, vec!["Step #1:".to_string(), "x = (a+b)/2".to_string()]);
    }

    #[test]
    fn test_sinks_as_trait_objects() {
        let mut sinks: Vec<Box<dyn TraceSink>> = vec![Box::new(LogSink), Box::new(ConsoleSink), Box::new(Vec::<String>::new())];
        for sink in sinks.iter_mut() {
            sink.emit("Use 'bisection method':");
        }
    }
}
