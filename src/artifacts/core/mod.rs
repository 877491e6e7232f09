//! Output plumbing shared by the binary
//!
//! `log` and `global-log` can produce arbitrarily long output, so on a
//! terminal it is routed through the `minus` pager instead of stdout.

use derive_new::new;
use minus::Pager;
use std::io::{self, Write};

/// `Write` adapter feeding a `minus` pager
///
/// The pager only accepts strings; bytes that are not valid UTF-8 are replaced
/// rather than rejected so a commit message can never abort the output.
///
/// ```ignore
/// let pager = Pager::new();
/// let writer = PagerWriter::new(pager.clone());
/// let mut repository = Repository::new(config, Box::new(writer));
/// repository.log().await?;
/// minus::page_all(pager)?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pager
            .push_str(String::from_utf8_lossy(buf))
            .map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
