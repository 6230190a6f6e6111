mod guide;
mod make_conductor_array;
mod make_insulator_array;
mod make_part;
mod make_part_array;

pub use make_conductor_array::{ConductorParams, MakeConductorArray};
pub use make_insulator_array::{InsulatorParams, MakeInsulatorArray};
pub use make_part::MakePart;
pub use make_part_array::MakePartArray;
