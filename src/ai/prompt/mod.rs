//! Prompt Builder System
//!
//! Standardized prompt construction for every completion the tool makes.
//! Structural scaffolding is shared; the wording of each task lives in
//! [`PromptTemplates`]. Answers are requested in Indonesian, the language of
//! the generated documentation.
//!
//! Callers truncate file content before handing it to a template.

/// Prompt section types
#[derive(Debug, Clone)]
pub enum PromptSection {
    /// Role definition with expertise area
    Role { expertise: String, task: String },
    /// Numbered objectives
    Objectives(Vec<String>),
    /// Ordered key-value pairs
    Context(Vec<(String, String)>),
    /// Raw text section with optional header
    Text {
        header: Option<String>,
        content: String,
    },
    /// Code block with language
    Code { language: String, content: String },
    /// Focus enforcement with restrictions
    Focus {
        target: String,
        restrictions: Vec<String>,
    },
}

/// Prompt builder for consistent prompt construction
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a role definition section
    pub fn role(mut self, expertise: &str, task: &str) -> Self {
        self.sections.push(PromptSection::Role {
            expertise: expertise.to_string(),
            task: task.to_string(),
        });
        self
    }

    /// Add objectives section
    pub fn objectives(mut self, objectives: Vec<&str>) -> Self {
        self.sections.push(PromptSection::Objectives(
            objectives.into_iter().map(String::from).collect(),
        ));
        self
    }

    /// Add a context item, appending to the existing context section if any
    pub fn context_item(mut self, key: &str, value: &str) -> Self {
        let entry = (key.to_string(), value.to_string());
        match self
            .sections
            .iter_mut()
            .find_map(|s| match s {
                PromptSection::Context(items) => Some(items),
                _ => None,
            }) {
            Some(items) => items.push(entry),
            None => self.sections.push(PromptSection::Context(vec![entry])),
        }
        self
    }

    /// Add text section
    pub fn text(mut self, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: None,
            content: content.to_string(),
        });
        self
    }

    /// Add text section with header
    pub fn section(mut self, header: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: Some(header.to_string()),
            content: content.to_string(),
        });
        self
    }

    /// Add code block
    pub fn code(mut self, language: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Code {
            language: language.to_string(),
            content: content.to_string(),
        });
        self
    }

    /// Add focus enforcement section
    pub fn focus(mut self, target: &str, restrictions: Vec<&str>) -> Self {
        self.sections.push(PromptSection::Focus {
            target: target.to_string(),
            restrictions: restrictions.into_iter().map(String::from).collect(),
        });
        self
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        let mut prompt = String::new();

        for section in self.sections {
            match section {
                PromptSection::Role { expertise, task } => {
                    prompt.push_str("<ROLE>\n");
                    prompt.push_str(&format!(
                        "You are an expert {} specializing in {}.\n",
                        expertise, task
                    ));
                    prompt.push_str("</ROLE>\n\n");
                }
                PromptSection::Objectives(objectives) => {
                    prompt.push_str("<OBJECTIVES>\n");
                    for (i, obj) in objectives.iter().enumerate() {
                        prompt.push_str(&format!("{}. {}\n", i + 1, obj));
                    }
                    prompt.push_str("</OBJECTIVES>\n\n");
                }
                PromptSection::Context(items) => {
                    prompt.push_str("# Konteks\n\n");
                    for (key, value) in items {
                        prompt.push_str(&format!("**{}**: {}\n", key, value));
                    }
                    prompt.push('\n');
                }
                PromptSection::Text { header, content } => {
                    if let Some(h) = header {
                        prompt.push_str(&format!("# {}\n\n", h));
                    }
                    prompt.push_str(&content);
                    prompt.push_str("\n\n");
                }
                PromptSection::Code { language, content } => {
                    prompt.push_str(&format!("```{}\n", language));
                    prompt.push_str(&content);
                    prompt.push_str("\n```\n\n");
                }
                PromptSection::Focus {
                    target,
                    restrictions,
                } => {
                    prompt.push_str("<FOCUS>\n");
                    prompt.push_str(&format!("IMPORTANT: Focus EXCLUSIVELY on: {}\n", target));
                    for restriction in restrictions {
                        prompt.push_str(&format!("- {}\n", restriction));
                    }
                    prompt.push_str("</FOCUS>\n\n");
                }
            }
        }

        prompt.trim_end().to_string()
    }
}

const ANSWER_IN_INDONESIAN: &str = "Jawab dalam bahasa Indonesia dengan gaya profesional.";

/// Fixed templates for the analysis and description steps
pub struct PromptTemplates;

impl PromptTemplates {
    /// Purpose statement from concatenated documentation
    pub fn project_purpose(documentation: &str) -> String {
        PromptBuilder::new()
            .role("software analyst", "reading project documentation")
            .text("Analisis dokumentasi proyek berikut dan tentukan tujuan utamanya.")
            .section("Dokumentasi", documentation)
            .text("Berikan deskripsi singkat dan profesional tentang tujuan proyek.")
            .text(ANSWER_IN_INDONESIAN)
            .build()
    }

    /// Libraries, frameworks and patterns from sampled source files
    pub fn technologies(language: &str, sources: &str) -> String {
        PromptBuilder::new()
            .role("software architect", "technology stack assessment")
            .objectives(vec![
                "Identifikasi teknologi dan library utama yang digunakan",
                "Identifikasi framework yang digunakan (jika ada)",
                "Identifikasi pola arsitektur kunci",
            ])
            .code(language, sources)
            .text("Berikan daftar singkat teknologi dan pola yang ditemukan.")
            .text(ANSWER_IN_INDONESIAN)
            .build()
    }

    /// Architecture insight from the rendered directory tree
    pub fn structure(tree: &str) -> String {
        PromptBuilder::new()
            .role("software architect", "project structure review")
            .objectives(vec![
                "Jelaskan arsitektur keseluruhan",
                "Jelaskan organisasi modul",
                "Jelaskan pola umum dalam struktur direktori",
            ])
            .section("Struktur", tree)
            .text("Berikan analisis profesional tentang struktur proyek.")
            .text(ANSWER_IN_INDONESIAN)
            .build()
    }

    /// Observations from per-category file counts; no file content
    pub fn additional_notes(counts: &[(&str, usize)]) -> String {
        let stats = counts
            .iter()
            .map(|(label, n)| format!("- {}: {}", label, n))
            .collect::<Vec<_>>()
            .join("\n");

        PromptBuilder::new()
            .role("software consultant", "project health observations")
            .section("Statistik File", &stats)
            .text("Berdasarkan informasi di atas, berikan observasi atau rekomendasi tambahan tentang proyek.")
            .text(ANSWER_IN_INDONESIAN)
            .build()
    }

    /// Structured narrative for the whole project
    pub fn project_description(
        name: &str,
        purpose: &str,
        technologies: &str,
        analysis: &str,
        notes: &str,
    ) -> String {
        PromptBuilder::new()
            .role("technical writer", "project documentation")
            .text("Berdasarkan analisis proyek berikut, tulis deskripsi yang komprehensif.")
            .context_item("Nama Proyek", name)
            .context_item("Tujuan", purpose)
            .context_item("Teknologi", technologies)
            .context_item("Analisis", analysis)
            .context_item("Catatan Tambahan", notes)
            .objectives(vec![
                "Mulai dengan pengantar yang jelas",
                "Jelaskan tujuan dan sasaran proyek",
                "Jelaskan arsitektur teknis dan pilihan teknologinya",
                "Soroti fitur dan komponen utama",
                "Simpulkan dengan pertimbangan penting",
            ])
            .text("Gunakan nada yang teknis namun mudah dipahami.")
            .text(ANSWER_IN_INDONESIAN)
            .build()
    }

    /// Description of one source module
    pub fn module(file_name: &str, language: &str, content: &str) -> String {
        PromptBuilder::new()
            .role("code documentation assistant", "module documentation")
            .context_item("Modul", file_name)
            .code(language, content)
            .objectives(vec![
                "Jelaskan tujuan modul",
                "Deskripsikan komponen dan fungsi utamanya",
                "Soroti pola atau pilihan desain penting",
                "Catat ketergantungan atau hubungan dengan modul lain",
            ])
            .focus(
                file_name,
                vec![
                    "Do NOT speculate about code you cannot see",
                    "Keep the description concise",
                ],
            )
            .text(ANSWER_IN_INDONESIAN)
            .build()
    }

    /// Description of one directory from its immediate source children
    pub fn directory(dir_name: &str, children: &[String]) -> String {
        PromptBuilder::new()
            .role("software architect", "codebase organization")
            .context_item("Direktori", dir_name)
            .context_item("Isi", &children.join(", "))
            .objectives(vec![
                "Jelaskan peran direktori dalam proyek",
                "Deskripsikan bagaimana isinya diorganisir",
                "Jelaskan pola atau konvensi yang digunakan",
                "Catat hubungan penting dengan direktori lain",
            ])
            .text("Pertahankan deskripsi yang ringkas.")
            .text(ANSWER_IN_INDONESIAN)
            .build()
    }
}
