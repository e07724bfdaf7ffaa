/*! Bookkeeping for lowering resolved contracts to Yul.
 *
 * Lowering a function discovers calls to other functions, helper code it needs and variables it
 * must address. The context collects all of that: callees are queued and generated once, virtual
 * calls resolve against the contract being compiled, declarations map to stable Yul names and
 * helpers are pooled by name. The driver drains the queue through a pluggable lowering.
 */

mod collector;
mod context;
mod driver;
mod errors;
pub mod names;
mod queue;
mod utils;
mod variable;

pub use collector::FunctionCollector;
pub use context::IRGenerationContext;
pub use driver::{generate_contract, generate_queued_functions, FunctionLowering};
pub use errors::{GenerationError, Result};
pub use queue::FunctionGenerationQueue;
pub use utils::UtilFunctions;
pub use variable::IRVariable;
