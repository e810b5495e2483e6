pub mod init;
pub mod inspect;
pub mod plan;
pub mod remote;
pub mod script;

pub use init::{init, InitArgs};
pub use inspect::{inspect, InspectArgs};
pub use plan::{plan, PlanArgs};
pub use remote::{fetch, move_collection, publish, save, FetchArgs, MoveArgs, PublishArgs, SaveArgs};
