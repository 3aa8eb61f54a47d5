// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]
use RustedRoots::Examples::root_examples::root_examples;
use RustedRoots::Utils::logger::init_logger;
use RustedRoots::Utils::task_parser::{SolveTask, TaskError};
use RustedRoots::numerical::trace::{ConsoleSink, TraceSink};
use log::info;
use std::env;
use std::path::Path;
use std::process::ExitCode;

/// `rusted_roots`              solve the built-in task
/// `rusted_roots task.toml`    solve the task described in the file
/// `rusted_roots example <n>`  run one of the worked examples
fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let result = match args.as_slice() {
        [cmd, n] if cmd == "example" => match n.parse::<usize>() {
            Ok(n) => root_examples(n).map_err(TaskError::from),
            Err(_) => {
                eprintln!("example number expected, got {}", n);
                return ExitCode::FAILURE;
            }
        },
        [path] => SolveTask::from_file(Path::new(path)).and_then(|task| solve(&task)),
        [] => solve(&SolveTask::default()),
        _ => {
            eprintln!("usage: rusted_roots [task.toml] | rusted_roots example <n>");
            return ExitCode::FAILURE;
        }
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn solve(task: &SolveTask) -> Result<(), TaskError> {
    let level = init_logger(task.loglevel.as_deref(), false)?;
    println!(" \n \n Program started with loglevel: {}", level);
    let reports = task.solve_all_with(|| Some(Box::new(ConsoleSink) as Box<dyn TraceSink>))?;
    for report in &reports {
        println!("{}", report);
    }
    info!(" \n \n Program ended");
    Ok(())
}
