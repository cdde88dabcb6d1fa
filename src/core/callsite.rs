//! Call-site capture
//!
//! A [`Callsite`] is the list of frames leading to a log call, most recent
//! first. Level methods are `#[track_caller]`, so every captured callsite knows
//! the file and line of the call. The logging macros additionally record the
//! name of the enclosing function, which is what namespaces are built from.

use std::panic::Location;

/// One frame of a callsite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub file: String,
    pub line: u32,
    /// Function or method name; `None` for closures and unknown frames
    pub function: Option<String>,
}

impl Frame {
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
            function: None,
        }
    }

    #[must_use]
    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    pub fn is_anonymous(&self) -> bool {
        self.function.is_none()
    }
}

/// Frames leading to a log call, most recent first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callsite {
    frames: Vec<Frame>,
}

impl Callsite {
    /// Callsite with a single frame and no function name.
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            frames: vec![Frame::new(file, line)],
        }
    }

    pub fn from_frames(frames: Vec<Frame>) -> Option<Self> {
        if frames.is_empty() {
            None
        } else {
            Some(Self { frames })
        }
    }

    /// Capture the location of the caller.
    #[track_caller]
    pub fn here() -> Self {
        Self::from(Location::caller())
    }

    /// Build a callsite from `file!()`, `line!()` and the type name of a
    /// function item declared inside the enclosing function.
    ///
    /// The type name looks like `crate::module::outer::{{closure}}::probe`;
    /// trailing closures become anonymous frames followed by the first named
    /// function. This is what [`callsite!`](crate::callsite) expands to.
    pub fn from_probe(file: &str, line: u32, probe: &str) -> Self {
        let path = probe.rsplit_once("::").map_or("", |(path, _)| path);
        let mut frames = Vec::new();

        for segment in path.rsplit("::") {
            if segment == "{{closure}}" {
                frames.push(Frame::new(file, line));
                continue;
            }
            if !segment.is_empty() {
                frames.push(Frame::new(file, line).with_function(segment));
            }
            break;
        }

        if frames.is_empty() {
            frames.push(Frame::new(file, line));
        }
        Self { frames }
    }

    /// Name the top frame.
    #[must_use]
    pub fn with_function(mut self, function: impl Into<String>) -> Self {
        if let Some(top) = self.frames.first_mut() {
            top.function = Some(function.into());
        }
        self
    }

    /// Append an older frame, e.g. the caller of the logging function.
    #[must_use]
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frames.push(frame);
        self
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Most recent frame.
    pub fn top(&self) -> &Frame {
        &self.frames[0]
    }

    /// Full source path of the top frame.
    pub fn path(&self) -> &str {
        &self.top().file
    }

    /// Source file name: everything after the last path separator.
    pub fn filename(&self) -> &str {
        let path = self.path();
        path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path)
    }

    pub fn line(&self) -> u32 {
        self.top().line
    }
}

impl From<&'static Location<'static>> for Callsite {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}

#[doc(hidden)]
pub fn type_name_of<T>(_: T) -> &'static str {
    std::any::type_name::<T>()
}
