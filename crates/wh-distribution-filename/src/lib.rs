pub use wheel::{Wheel, WheelBuilder, WheelFilenameError, WheelParse};

mod splitter;
mod wheel;
