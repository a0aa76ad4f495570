pub use task::{RequiredBehaviour, Task};

pub mod task;

/// The tasks of one document, in the order their headings appear.
#[derive(Default, Debug)]
pub struct TaskCatalogue {
    pub tasks: Vec<Task>,
}
