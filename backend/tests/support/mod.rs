#![allow(dead_code)]

use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use timetable_planner::models::Lecture;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the variables on unwind and serializes access to the process
/// environment across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

pub fn lecture(id: &str, title: &str, grade: u8, major: &str, schedule: &str) -> Lecture {
    Lecture {
        id: id.to_string(),
        title: title.to_string(),
        credits: Some(3),
        grade,
        major: major.to_string(),
        schedule: schedule.to_string(),
    }
}

pub const MAJORS_JSON: &str = r#"[
  {"id": "CS101", "title": "Intro to Programming", "credits": 3, "grade": 1,
   "major": "공과대학<p>컴퓨터공학과", "schedule": "월1~3(A101)"},
  {"id": "CS201", "title": "Data Structures", "credits": "3학점", "grade": 2,
   "major": "공과대학<p>컴퓨터공학과", "schedule": "화4~5(A102)<p>목4~5(A102)"},
  {"id": "MA101", "title": "Calculus", "credits": "2", "grade": 1,
   "major": "자연과학대학<p>수학과", "schedule": "수1,2<p>금1,2"}
]"#;

pub const LIBERAL_ARTS_JSON: &str = r#"[
  {"id": "LA100", "title": "Academic Writing", "credits": 2, "grade": 1,
   "major": "교양", "schedule": "토2~3"},
  {"id": "MA101", "title": "Calculus (Liberal Arts)", "credits": 2, "grade": 1,
   "major": "교양", "schedule": "금5"}
]"#;

/// Write both catalog documents into `dir` under their default names.
pub fn write_catalog(dir: &Path) {
    std::fs::write(dir.join("schedules-majors.json"), MAJORS_JSON).unwrap();
    std::fs::write(dir.join("schedules-liberal-arts.json"), LIBERAL_ARTS_JSON).unwrap();
}
