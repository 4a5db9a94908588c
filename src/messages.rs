use std::fmt;
use std::str::FromStr;

/// Language of every user-facing string the crate produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    pub fn no_file_selected(self) -> &'static str {
        match self {
            Language::English => "No file was selected.",
            Language::Spanish => "No se seleccionó ningún archivo.",
        }
    }

    pub fn unsupported_format(self) -> &'static str {
        match self {
            Language::English => "Unsupported format. Only PDF and DOCX are supported.",
            Language::Spanish => "Formato no soportado. Solo PDF y DOCX.",
        }
    }

    pub fn processing_failure(self) -> &'static str {
        match self {
            Language::English => "There was an error processing the file.",
            Language::Spanish => "Hubo un error procesando el archivo.",
        }
    }

    /// "None found" message for a format label such as `"PDF"`.
    pub fn none_found(self, format: &str) -> String {
        match self {
            Language::English => format!("No embedded files found in the {format}."),
            Language::Spanish => format!("No se encontraron archivos embebidos en el {format}."),
        }
    }

    pub fn results_header(self) -> &'static str {
        match self {
            Language::English => "Embedded files found:",
            Language::Spanish => "Archivos embebidos encontrados:",
        }
    }

    pub fn download_label(self, file_name: &str) -> String {
        match self {
            Language::English => format!("Download {file_name}"),
            Language::Spanish => format!("Descargar {file_name}"),
        }
    }

    /// Short code accepted by [`Language::from_str`].
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "es" | "spanish" | "español" | "espanol" => Ok(Language::Spanish),
            other => Err(format!("unknown language '{other}' (expected 'en' or 'es')")),
        }
    }
}
