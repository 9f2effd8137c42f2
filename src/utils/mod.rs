use std::fs::OpenOptions;
use std::io::{self, Write};


#[derive(Debug, Clone)]
pub enum CL {
    Purple,
    Green,
    LimeGreen,
    DullGreen,
    DullRed,
    Teal,
    DullTeal,
    DimLightBlue,
    Dull,
    End,
}

impl CL {
    pub fn get(&self) -> &str {
        match self {
            CL::Purple => "\x1b[38;5;135m",
            CL::Green => "\x1b[38;5;10m",
            CL::LimeGreen => "\x1b[38;5;154m",
            CL::DullGreen => "\x1b[38;5;29m",
            CL::DullRed => "\x1b[38;5;124m",
            CL::Teal => "\x1b[38;5;14m",
            CL::DullTeal => "\x1b[38;5;153m",
            CL::DimLightBlue => "\x1b[38;5;159m",
            CL::Dull => "\x1b[38;5;8m",
            CL::End => "\x1b[37m",
        }
    }
}

// =-= FileHandler =-= //
// Append-only log file, used for the optional on-disk trade history.
pub struct FileHandler {
    file: std::fs::File,
}

impl FileHandler {
    pub fn new(file_path: &str) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        Ok(Self { file })
    }

    pub fn write_line(&mut self, content: String) -> io::Result<()> {
        writeln!(self.file, "{}", content)
    }
}
