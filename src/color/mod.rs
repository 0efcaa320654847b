mod utils;

use smart_leds::RGB8;

pub use utils::{BLACK, dim_all, fill, scale_color, triangle_envelope};

pub type Rgb = RGB8;
