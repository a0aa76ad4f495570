mod config;

use anyhow::anyhow;
use itertools::Itertools;
use taskdown_core::model::TaskCatalogue;

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let settings_path = if cfg!(debug_assertions) {
        "taskdown.example.yaml"
    } else {
        "taskdown.yaml"
    };
    let settings = config::Root::load(settings_path)?;

    let catalogue = taskdown_core::load(&settings.file, &settings.heading)?;

    match std::env::args().nth(1) {
        None => print!("{}", render_listing(&catalogue)),
        Some(name) => {
            let task = catalogue
                .get_task_by_name(&name)
                .ok_or(anyhow!("Task {name} is not defined"))?;
            print!("{}", serde_norway::to_string(task)?);
        }
    }

    Ok(())
}

/// One line per task, names aligned, followed by the first line of the description.
/// Tasks without a script list the tasks they pull in.
fn render_listing(catalogue: &TaskCatalogue) -> String {
    let width = catalogue
        .tasks
        .iter()
        .map(|task| task.name.chars().count())
        .max()
        .unwrap_or_default();

    catalogue
        .tasks
        .iter()
        .map(|task| {
            let summary = task.description.first().map_or("", String::as_str);
            let requires = if task.is_commandless() {
                format!("[{}]", task.depends_on.join(", "))
            } else {
                String::new()
            };
            let details = [summary, requires.as_str()]
                .into_iter()
                .filter(|part| !part.is_empty())
                .join(" ");
            format!("{:width$}  {details}", task.name).trim_end().to_owned() + "\n"
        })
        .join("")
}
