pub mod ships;
pub mod text;

pub use ships::{vessel_size_and_count, VesselCount};
pub use text::{
    after_last_dash, between_phrases, has_dash, has_parens, last_paren_span,
    leading_sl_before_dash, service_name,
};
