//! # Formatter
//!
//! Human readable, colored rendering of inspection results and startup errors.
use colored::*;
use reflekt_core::{
    prost::Message, prost_types::FileDescriptorProto, reflection::query::ReflectionReply,
    registry::LoadError,
};
use std::fmt::Display;

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

pub struct ServiceList(pub Vec<String>);

pub struct GenericError<T: Display>(pub &'static str, pub T);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl From<LoadError> for FormattedString {
    fn from(err: LoadError) -> Self {
        FormattedString(format!(
            "{}\n\n'{}'",
            "Failed to load descriptor set:".red().bold(),
            err
        ))
    }
}

impl<T: Display> From<GenericError<T>> for FormattedString {
    fn from(GenericError(msg, err): GenericError<T>) -> Self {
        FormattedString(format!("{}:\n\n'{}'", msg.red().bold(), err))
    }
}

impl From<ServiceList> for FormattedString {
    fn from(ServiceList(services): ServiceList) -> Self {
        if services.is_empty() {
            return FormattedString("No services found.".yellow().to_string());
        }

        let mut out = String::new();
        out.push_str("Available Services:\n");
        for svc in services {
            out.push_str(&format!("  - {}\n", svc.green()));
        }
        FormattedString(out.trim_end().to_string())
    }
}

impl From<ReflectionReply> for FormattedString {
    fn from(reply: ReflectionReply) -> Self {
        match reply {
            ReflectionReply::FileDescriptors(files) => format_files(&files),
            ReflectionReply::ExtensionNumbers {
                base_type_name,
                extension_numbers,
            } => {
                if extension_numbers.is_empty() {
                    return FormattedString(
                        format!("No extensions of {base_type_name} found.")
                            .yellow()
                            .to_string(),
                    );
                }

                let numbers = extension_numbers
                    .iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");

                FormattedString(format!(
                    "{} {}:\n  {}",
                    "Extensions of".cyan(),
                    base_type_name.green(),
                    numbers.yellow()
                ))
            }
            ReflectionReply::Services(services) => FormattedString::from(ServiceList(services)),
            ReflectionReply::NotFound => FormattedString("Not found.".yellow().to_string()),
        }
    }
}

fn format_files(files: &[Vec<u8>]) -> FormattedString {
    let mut out = String::new();
    out.push_str("Files (dependencies first):\n");

    for (position, bytes) in files.iter().enumerate() {
        let line = match FileDescriptorProto::decode(bytes.as_slice()) {
            Ok(file) => {
                let package = if file.package().is_empty() {
                    String::new()
                } else {
                    format!(" ({})", file.package().cyan())
                };
                format!("{}{}", file.name().green(), package)
            }
            Err(err) => format!("{} {err}", "<undecodable>".red()),
        };

        out.push_str(&format!("  {}. {}\n", position + 1, line));
    }

    FormattedString(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(reply: ReflectionReply) -> String {
        colored::control::set_override(false);
        FormattedString::from(reply).0
    }

    fn encoded(name: &str, package: &str) -> Vec<u8> {
        FileDescriptorProto {
            name: Some(name.to_string()),
            package: Some(package.to_string()),
            ..Default::default()
        }
        .encode_to_vec()
    }

    #[test]
    fn files_are_listed_in_reply_order() {
        let out = plain(ReflectionReply::FileDescriptors(vec![
            encoded("a.proto", "pkg"),
            encoded("b.proto", ""),
        ]));

        assert_eq!(
            out,
            "Files (dependencies first):\n  1. a.proto (pkg)\n  2. b.proto"
        );
    }

    #[test]
    fn extension_numbers() {
        let out = plain(ReflectionReply::ExtensionNumbers {
            base_type_name: "pkg.A".to_string(),
            extension_numbers: vec![100, 101],
        });
        assert_eq!(out, "Extensions of pkg.A:\n  100, 101");

        let out = plain(ReflectionReply::ExtensionNumbers {
            base_type_name: "pkg.A".to_string(),
            extension_numbers: vec![],
        });
        assert_eq!(out, "No extensions of pkg.A found.");
    }

    #[test]
    fn services_and_not_found() {
        assert_eq!(
            plain(ReflectionReply::Services(vec!["pkg.Svc".to_string()])),
            "Available Services:\n  - pkg.Svc"
        );
        assert_eq!(plain(ReflectionReply::Services(vec![])), "No services found.");
        assert_eq!(plain(ReflectionReply::NotFound), "Not found.");
    }
}
