use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Instant;

use camino::Utf8Path;
use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::error::{BuildError, ClearError};

const ANSI_BLUE: Style = Style::new().blue();

pub(crate) static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .expect("Error setting progress bar template")
        .progress_chars("#>-")
});

pub fn as_overhead(s: Instant) -> impl Display {
    let e = Instant::now();
    let f = format!("(+{}ms)", e.duration_since(s).as_millis());
    ANSI_BLUE.apply_to(f)
}

/// Delete the output directory if it exists, then recreate it empty.
pub fn clear_dist(dist: &Utf8Path) -> Result<(), ClearError> {
    let s = Instant::now();

    if fs::metadata(dist).is_ok() {
        fs::remove_dir_all(dist) //
            .map_err(ClearError::RemoveError)?;
    }

    fs::create_dir_all(dist) //
        .map_err(ClearError::CreateError)?;

    info!("cleaned {dist} {}", as_overhead(s));

    Ok(())
}

/// Copy the public assets (stylesheet, script, fonts) into the output.
pub fn copy_public(public: &Utf8Path, dist: &Utf8Path) -> Result<(), BuildError> {
    if !public.is_dir() {
        debug!(%public, "no public directory, nothing to copy");
        return Ok(());
    }

    let pb = ProgressBar::no_length();
    pb.set_message("Copying public files...");
    pb.set_style(PROGRESS_STYLE.clone());

    let s = Instant::now();
    copy_rec(public, dist, &pb).map_err(BuildError::CopyPublic)?;

    pb.finish_with_message(format!("Finished copying public files! {}", as_overhead(s)));

    Ok(())
}

fn copy_rec(src: impl AsRef<Path>, dst: impl AsRef<Path>, pb: &ProgressBar) -> std::io::Result<()> {
    fs::create_dir_all(&dst)?;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let filetype = entry.file_type()?;
        if filetype.is_dir() {
            copy_rec(entry.path(), dst.as_ref().join(entry.file_name()), pb)?;
        } else {
            fs::copy(entry.path(), dst.as_ref().join(entry.file_name()))?;
            pb.inc(1);
        }
    }
    Ok(())
}

/// Write one page under `dist`, creating parent directories as needed.
pub fn write_page(dist: &Utf8Path, path: &Utf8Path, html: &str) -> Result<(), BuildError> {
    let target = dist.join(path);

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|err| BuildError::Page(path.to_string(), err))?;
    }

    fs::write(&target, html).map_err(|err| BuildError::Page(path.to_string(), err))
}
