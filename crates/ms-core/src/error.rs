use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    ZeroWidth,
    BufferTooSmall { required: usize, actual: usize },
    SizeMismatch { expected: usize, actual: usize },
    CapacityOverflow,
    AllocationFailed { bytes: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroWidth => write!(f, "base width must be at least 1"),
            Self::BufferTooSmall { required, actual } => {
                write!(
                    f,
                    "buffer too small: mip chain needs {required} channels, got {actual}"
                )
            }
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::CapacityOverflow => write!(f, "capacity overflow"),
            Self::AllocationFailed { bytes } => write!(f, "failed to allocate {bytes} bytes"),
        }
    }
}

impl std::error::Error for Error {}
