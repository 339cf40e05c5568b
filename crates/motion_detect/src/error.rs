use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("ROI ({roi_w}x{roi_h}) does not fit inside a {frame_w}x{frame_h} frame at ({roi_x}, {roi_y})")]
    #[diagnostic(code(motion_detect::roi_out_of_bounds))]
    RoiOutOfBounds {
        roi_x: u32,
        roi_y: u32,
        roi_w: u32,
        roi_h: u32,
        frame_w: u32,
        frame_h: u32,
    },
    #[error("frame stride {stride} is too short for width {width}")]
    #[diagnostic(code(motion_detect::stride_too_short))]
    StrideTooShort { stride: usize, width: u32 },
    #[error("frame buffer length {len} is too short for height {height} and stride {stride}")]
    #[diagnostic(code(motion_detect::frame_too_short))]
    FrameTooShort { len: usize, height: u32, stride: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
