mod make_armour;
mod make_braid;
mod make_conductor;
mod make_filler;
mod make_insulator;
mod make_lap;
mod make_mesh_conductor;

pub use make_armour::MakeArmour;
pub use make_braid::{make_braid_strand, MakeBraid};
pub use make_conductor::{MakeConductor, MakeSolidConductor, MakeStrandedConductor};
pub use make_filler::MakeCentralFiller;
pub use make_insulator::MakeInsulator;
pub use make_lap::MakeLap;
pub use make_mesh_conductor::MakeMeshConductor;

pub(crate) use make_insulator::{peel_factor, InsulatorBody};
