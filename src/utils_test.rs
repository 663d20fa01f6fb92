use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use crate::config::{Options, RunMode};
use crate::diagnostic::Reporter;
use crate::line::Line;

/// An output sink the test can keep a handle on while the reporter owns
/// the writer half.
#[derive(Clone, Default)]
pub struct SharedBuf(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("output should be UTF-8")
    }
}

/// A reporter writing into a captured buffer. Colors are forced off so the
/// exact-output assertions hold regardless of where the tests run.
pub fn reporter(mode: RunMode, show_source: bool, show_explain: bool) -> (Reporter, SharedBuf) {
    colored::control::set_override(false);
    let buf = SharedBuf::default();
    let options = Options {
        mode,
        show_source,
        show_explain,
    };
    (Reporter::new(options, Box::new(buf.clone())), buf)
}

/// A logical line built from raw physical texts, terminators included.
pub fn line(reporter: &Reporter, file: &str, first_number: usize, raw: &[&str]) -> Line {
    Line::new(
        reporter.clone(),
        file,
        first_number,
        raw.iter().map(|text| text.to_string()).collect(),
    )
}
