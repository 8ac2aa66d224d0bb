use console::{style, Term};
use std::time::Instant;

/// Prints `[i/n] description [Nms]` lines for each step of a run.
pub struct TaskRunner {
    term: Term,
    num_tasks: u32,
    current_task: u32,
    now: Instant,
    descr: String,
    verbose: bool,
    started: bool,
}

impl TaskRunner {
    pub fn new(num_tasks: u32, verbose: bool) -> Self {
        Self {
            term: Term::stdout(),
            num_tasks,
            current_task: 0,
            now: Instant::now(),
            descr: "".into(),
            verbose,
            started: false,
        }
    }

    fn task_id(&self) -> String {
        style(format!("[{}/{}]", self.current_task + 1, self.num_tasks))
            .force_styling(true)
            .to_string()
    }

    pub fn start_task(&mut self, descr: impl Into<String>) {
        if self.started {
            self.finish_task(true);
        }
        self.now = Instant::now();
        self.descr = descr.into();
        self.started = true;
        if self.verbose {
            println!("{} {}", self.task_id(), &self.descr);
        }
    }

    fn finish_task(&mut self, skipped: bool) {
        self.started = false;
        let status = if skipped {
            "[SKIPPED]".to_string()
        } else {
            format!("[{}ms]", self.now.elapsed().as_millis())
        };
        if self.verbose && self.term.is_term() {
            self.term.clear_last_lines(1).ok();
        }
        println!("{} {} {}", self.task_id(), &self.descr, status);
        self.current_task += 1;
    }

    pub fn end_task(&mut self) {
        self.finish_task(false);
    }
}
