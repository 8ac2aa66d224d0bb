use appicon::font::PREFERRED_FONTS;
use appicon::{Config, Font};
use std::path::{Path, PathBuf};

pub fn doctor(config: &Config) {
    print!("{}", Doctor::new(config));
}

#[derive(Debug)]
struct Doctor {
    groups: Vec<Group>,
    font: Font,
}

impl Doctor {
    fn new(config: &Config) -> Self {
        let mut fonts = vec![];
        if let Some(font) = config.font() {
            fonts.push(Check::file("configured", font));
        }
        fonts.extend(PREFERRED_FONTS.into_iter().map(|font| Check::file("system", Path::new(font))));
        Self {
            groups: vec![
                Group {
                    name: "inputs",
                    checks: vec![
                        Check::file("source", config.source()),
                        Check::dir("output", config.out_dir()),
                    ],
                },
                Group {
                    name: "fonts",
                    checks: fonts,
                },
            ],
            font: Font::resolve(config.font()),
        }
    }
}

impl std::fmt::Display for Doctor {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for group in &self.groups {
            write!(f, "{}", group)?;
        }
        writeln!(f, "{:20} {}", "glyph font", self.font)
    }
}

#[derive(Debug)]
struct Group {
    name: &'static str,
    checks: Vec<Check>,
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{:-^1$}", self.name, 60)?;
        for check in &self.checks {
            write!(f, "{:20} ", check.name)?;
            let status = if check.found { "ok" } else { "not found" };
            writeln!(f, "{:20}{}", status, check.path.display())?;
        }
        writeln!(f)
    }
}

#[derive(Debug)]
struct Check {
    name: &'static str,
    path: PathBuf,
    found: bool,
}

impl Check {
    fn file(name: &'static str, path: &Path) -> Self {
        Self {
            name,
            path: path.to_path_buf(),
            found: path.is_file(),
        }
    }

    fn dir(name: &'static str, path: &Path) -> Self {
        Self {
            name,
            path: path.to_path_buf(),
            found: path.is_dir(),
        }
    }
}
