//! Convert HTML files to element trees.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use html2react_core::{
    to_element_tree, to_json_string, to_jsx, to_react_element, ComponentMap, StrictVirtualDom,
};
use rayon::prelude::*;
use walkdir::WalkDir;

use super::read_input;
use crate::config::Format;

/// Conversion settings resolved from flags and config.
#[derive(Debug, Clone)]
pub struct Options {
    pub format: Format,
    pub pretty: bool,
    pub strict: bool,
}

/// Convert one HTML fragment to the requested output format.
pub fn convert_source(
    html: &str,
    components: &ComponentMap<String>,
    options: &Options,
) -> Result<String> {
    let rendered = if options.strict {
        to_react_element(html, components, &StrictVirtualDom)?
    } else {
        to_element_tree(html, components)?
    };

    let output = match options.format {
        Format::Json => to_json_string(&rendered, options.pretty)?,
        Format::Jsx => to_jsx(&rendered),
    };

    Ok(output)
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

/// An HTML file to convert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    /// Location below the output directory: the path inside a walked
    /// directory, or the file name of a file given directly
    pub relative: PathBuf,
}

/// Expand inputs into a list of files. Directories are walked for HTML files.
pub fn collect_inputs(inputs: &[PathBuf]) -> Result<Vec<InputFile>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                if entry.file_type().is_file() && is_html(entry.path()) {
                    let relative = entry.path().strip_prefix(input)?.to_path_buf();
                    files.push(InputFile {
                        path: entry.into_path(),
                        relative,
                    });
                }
            }
        } else if input.is_file() {
            let relative = input
                .file_name()
                .map_or_else(|| input.clone(), PathBuf::from);
            files.push(InputFile {
                path: input.clone(),
                relative,
            });
        } else {
            bail!("Input not found: {}", input.display());
        }
    }

    Ok(files)
}

/// Output path for a converted input: `<dir>/<relative>` with the format's extension.
fn output_path(dir: &Path, input: &InputFile, format: Format) -> PathBuf {
    dir.join(input.relative.with_extension(format.extension()))
}

/// Map every input to its output path, failing if two inputs share one.
fn output_targets(dir: &Path, files: &[InputFile], format: Format) -> Result<Vec<PathBuf>> {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::new();
    let mut targets = Vec::with_capacity(files.len());

    for file in files {
        let target = output_path(dir, file, format);
        if let Some(previous) = seen.insert(target.clone(), &file.path) {
            bail!(
                "{} and {} would both be written to {}",
                previous.display(),
                file.path.display(),
                target.display()
            );
        }
        targets.push(target);
    }

    Ok(targets)
}

/// Run the convert command.
pub fn run(
    inputs: &[PathBuf],
    output: Option<&Path>,
    components: &ComponentMap<String>,
    options: &Options,
) -> Result<()> {
    let stdin_only = inputs.is_empty() || (inputs.len() == 1 && inputs[0] == Path::new("-"));
    if stdin_only {
        let source = read_input(None)?;
        let converted =
            convert_source(&source, components, options).context("Failed to convert stdin")?;
        println!("{converted}");
        return Ok(());
    }

    let start = Instant::now();
    let files = collect_inputs(inputs)?;

    tracing::debug!("Converting {} files", files.len());

    let targets = output
        .map(|dir| output_targets(dir, &files, options.format))
        .transpose()?;

    let results = files
        .par_iter()
        .map(|file| {
            let source = read_input(Some(file.path.as_path()))?;
            let converted = convert_source(&source, components, options)
                .with_context(|| format!("Failed to convert {}", file.path.display()))?;
            Ok::<_, anyhow::Error>(converted)
        })
        .collect::<Result<Vec<_>>>()?;

    match output.zip(targets) {
        Some((dir, targets)) => {
            for (target, converted) in targets.iter().zip(&results) {
                if let Some(parent) = target.parent() {
                    fs::create_dir_all(parent)
                        .with_context(|| format!("Failed to create {}", parent.display()))?;
                }
                fs::write(target, converted)
                    .with_context(|| format!("Failed to write {}", target.display()))?;
                tracing::debug!("Wrote {}", target.display());
            }
            tracing::info!(
                "Converted {} files in {}ms",
                results.len(),
                start.elapsed().as_millis()
            );
            tracing::info!("Output: {}", dir.display());
        }
        None => {
            for converted in &results {
                println!("{converted}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn options(format: Format) -> Options {
        Options {
            format,
            pretty: false,
            strict: false,
        }
    }

    fn widgets() -> ComponentMap<String> {
        [("Widget".to_string(), "MyWidget".to_string())]
            .into_iter()
            .collect()
    }

    #[test]
    fn converts_to_json() {
        let json = convert_source(r#"<Widget foo="1"/>"#, &widgets(), &options(Format::Json))
            .unwrap();

        assert_eq!(json, r#"{"component":"MyWidget","props":{"foo":"1","key":"0"}}"#);
    }

    #[test]
    fn converts_to_jsx() {
        let jsx = convert_source(
            "<label for=a>x</label><br>",
            &ComponentMap::new(),
            &options(Format::Jsx),
        )
        .unwrap();

        assert_eq!(jsx, r#"<><label htmlFor="a" key="0">x</label><br key="1" /></>"#);
    }

    #[test]
    fn strict_mode_rejects_invalid_components() {
        let components: ComponentMap<String> = [("Widget".to_string(), "bad name".to_string())]
            .into_iter()
            .collect();
        let strict = Options {
            strict: true,
            ..options(Format::Json)
        };

        assert!(convert_source("<Widget/>", &components, &strict).is_err());
        assert!(convert_source("<Widget/>", &components, &options(Format::Json)).is_ok());
    }

    #[test]
    fn reports_parse_errors() {
        let result = convert_source("<div", &ComponentMap::new(), &options(Format::Json));

        assert!(result.is_err());
    }

    #[test]
    fn collects_html_files_from_directories() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("pages/nested");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join("pages/b.html"), "<p>b</p>").unwrap();
        fs::write(temp.path().join("pages/a.htm"), "<p>a</p>").unwrap();
        fs::write(nested.join("c.HTML"), "<p>c</p>").unwrap();
        fs::write(temp.path().join("pages/notes.txt"), "skip").unwrap();

        let files = collect_inputs(&[temp.path().join("pages")]).unwrap();
        let relative: Vec<_> = files.iter().map(|f| f.relative.clone()).collect();

        assert_eq!(
            relative,
            vec![
                PathBuf::from("a.htm"),
                PathBuf::from("b.html"),
                PathBuf::from("nested/c.HTML")
            ]
        );
        assert_eq!(files[2].path, nested.join("c.HTML"));
    }

    #[test]
    fn errors_on_missing_input() {
        let temp = tempdir().unwrap();

        assert!(collect_inputs(&[temp.path().join("missing.html")]).is_err());
    }

    #[test]
    fn writes_one_file_per_input() {
        let temp = tempdir().unwrap();
        let input = temp.path().join("card.html");
        let out = temp.path().join("out");
        fs::write(&input, "<div class=card>hi</div>").unwrap();

        run(&[input], Some(out.as_path()), &ComponentMap::new(), &options(Format::Jsx)).unwrap();

        let written = fs::read_to_string(out.join("card.jsx")).unwrap();
        assert_eq!(written, r#"<div className="card" key="0">hi</div>"#);
    }

    #[test]
    fn mirrors_directory_layout_in_output() {
        let temp = tempdir().unwrap();
        let pages = temp.path().join("pages");
        let out = temp.path().join("out");
        fs::create_dir_all(pages.join("blog")).unwrap();
        fs::write(pages.join("index.html"), "<p>home</p>").unwrap();
        fs::write(pages.join("blog/index.html"), "<p>blog</p>").unwrap();

        run(&[pages], Some(out.as_path()), &ComponentMap::new(), &options(Format::Jsx)).unwrap();

        assert_eq!(
            fs::read_to_string(out.join("index.jsx")).unwrap(),
            r#"<p key="0">home</p>"#
        );
        assert_eq!(
            fs::read_to_string(out.join("blog/index.jsx")).unwrap(),
            r#"<p key="0">blog</p>"#
        );
    }

    #[test]
    fn refuses_inputs_with_the_same_output() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("out");
        fs::create_dir_all(temp.path().join("a")).unwrap();
        fs::create_dir_all(temp.path().join("b")).unwrap();
        let first = temp.path().join("a/index.html");
        let second = temp.path().join("b/index.html");
        fs::write(&first, "<p>a</p>").unwrap();
        fs::write(&second, "<p>b</p>").unwrap();

        let result = run(
            &[first, second],
            Some(out.as_path()),
            &ComponentMap::new(),
            &options(Format::Json),
        );

        let message = result.unwrap_err().to_string();
        assert!(message.contains("would both be written to"));
        assert!(!out.join("index.json").exists());
    }
}
