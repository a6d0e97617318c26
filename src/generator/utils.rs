use std::{
    fs::{File, OpenOptions},
    path::Path,
};

use anyhow::Context;
use chrono::NaiveDateTime;

/// Opens `path` for writing from scratch, creating missing parent directories.
pub(super) fn create_output(path: &Path) -> anyhow::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.exists()) {
        std::fs::create_dir_all(parent).with_context(|| format!("while creating {parent:?}"))?;
    }
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("while opening {path:?}"))
}

/// "3 days ago" style distance between `date` and `now`.
pub(super) fn relative_time(date: NaiveDateTime, now: NaiveDateTime) -> String {
    let delta = now.signed_duration_since(date);
    let future = delta.num_seconds() < 0;
    let delta = delta.abs();

    let minutes = delta.num_minutes();
    let hours = delta.num_hours();
    let days = delta.num_days();
    let distance = if minutes < 1 {
        "less than a minute".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        format!("about {}", plural(hours, "hour"))
    } else if days < 30 {
        plural(days, "day")
    } else if days < 365 {
        plural(days / 30, "month")
    } else {
        format!("about {}", plural(days / 365, "year"))
    };

    if future {
        format!("in {distance}")
    } else {
        format!("{distance} ago")
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}
