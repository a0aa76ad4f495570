use crate::model::{Task, TaskCatalogue};

pub mod parser;

impl From<Vec<Task>> for TaskCatalogue {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl TaskCatalogue {
    pub fn get_all_task_names(&self) -> Vec<String> {
        self.tasks.iter().map(|task| task.name.clone()).collect()
    }

    /// Headings are not required to be unique, the first task wins.
    pub fn get_task_by_name(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.name == name)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
