pub mod clock;
pub mod spaces;
