// ABOUTME: Swappable output sink so `print` can be captured by tests instead of writing to stdout

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

thread_local! {
    static SINK: RefCell<Box<dyn Write>> = RefCell::new(Box::new(io::stdout()));
}

/// Write a line to the current sink, as `print` does for every value.
pub fn write_line(line: &str) {
    SINK.with(|sink| {
        let mut sink = sink.borrow_mut();
        let _ = writeln!(sink, "{}", line);
    });
}

fn set_sink(sink: Box<dyn Write>) -> Box<dyn Write> {
    SINK.with(|cell| cell.replace(sink))
}

/// RAII guard that redirects the sink for the lifetime of the guard and
/// restores the previous one on drop, including on an unwinding panic, so
/// one test's captured output never bleeds into the next.
pub struct SinkGuard {
    previous: Option<Box<dyn Write>>,
}

impl SinkGuard {
    pub fn capture(buffer: Rc<RefCell<Vec<u8>>>) -> Self {
        let previous = set_sink(Box::new(BufferWriter(buffer)));
        SinkGuard {
            previous: Some(previous),
        }
    }
}

impl Drop for SinkGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            set_sink(previous);
        }
    }
}

struct BufferWriter(Rc<RefCell<Vec<u8>>>);

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
