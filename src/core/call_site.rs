//! Call-site capture for trace-level diagnostics

use std::panic::Location;

/// Source location of a logging call.
///
/// Captured through `#[track_caller]`, so the location is the first frame
/// outside this crate. The logging macros also fill in `module_path!()` and
/// the enclosing function's path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    pub module: Option<&'static str>,
    pub function: Option<&'static str>,
    pub file: &'static str,
    pub line: u32,
}

impl CallSite {
    pub const fn new(module: Option<&'static str>, file: &'static str, line: u32) -> Self {
        Self {
            module,
            function: None,
            file,
            line,
        }
    }

    #[must_use]
    pub const fn with_function(self, function: &'static str) -> Self {
        Self {
            function: Some(function),
            ..self
        }
    }

    /// Location of the caller of the enclosing `#[track_caller]` function
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(None, location.file(), location.line())
    }
}
