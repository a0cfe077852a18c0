//! Progress reporting for multi-file runs

use indicatif::{ProgressBar, ProgressStyle};

/// A progress bar over the discovered files. Hidden when quiet or when
/// there is only one file to process.
pub fn file_bar(total: u64, quiet: bool) -> Option<ProgressBar> {
    if quiet || total < 2 {
        return None;
    }
    let bar = ProgressBar::new(total);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files {msg}")
            .expect("progress template is valid")
            .progress_chars("##-"),
    );
    Some(bar)
}

/// Mark one file as done.
pub fn file_completed(bar: &Option<ProgressBar>, name: &str) {
    if let Some(bar) = bar {
        bar.set_message(format!("Processed: {name}"));
        bar.inc(1);
    }
}

/// Finish progress reporting.
pub fn finish(bar: &Option<ProgressBar>) {
    if let Some(bar) = bar {
        bar.finish_with_message("Complete");
    }
}
