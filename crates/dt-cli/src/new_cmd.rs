use std::fs;
use std::path::Path;

use dt_core::DialogueError;
use dt_loader::{new_document_template, TemplateOptions};

use crate::{CliFailure, NewArgs};

pub(crate) fn template_options(args: &NewArgs) -> TemplateOptions {
    let defaults = TemplateOptions::default();
    TemplateOptions {
        title: args.title.clone().unwrap_or(defaults.title),
        author: args.author.clone().unwrap_or(defaults.author),
        description: args.description.clone().unwrap_or(defaults.description),
        creation_date: args.date.clone().unwrap_or(defaults.creation_date),
    }
}

pub(crate) fn run_new(args: NewArgs) -> Result<i32, DialogueError> {
    let output = Path::new(&args.output);
    if output.exists() && !args.force {
        return Err(DialogueError::new(
            "CLI_OUTPUT_EXISTS",
            format!(
                "Refusing to overwrite {} without --force.",
                output.display()
            ),
        ));
    }

    let document = new_document_template(template_options(&args));
    let payload = serde_json::to_string_pretty(&document)
        .map_err(|error| CliFailure::OutputSerialize.wrap(error))?;
    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|error| CliFailure::OutputWrite.at(parent, error))?;
    }
    fs::write(output, payload).map_err(|error| CliFailure::OutputWrite.at(output, error))?;
    log::info!("wrote dialogue template to {}", output.display());

    println!("RESULT:OK");
    println!("FILE_OUT:{}", output.display());
    Ok(0)
}
