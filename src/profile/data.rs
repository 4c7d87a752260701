//! Typed profile variants.
//!
//! `ProfileData::parse` is the only place raw YAML is inspected. Fields keep just
//! enough of the author's shape (`NumericInput`, `Endpoints`) for validators to
//! tell "absent" from "present but wrong".

use crate::profile::kind::ProfileKind;
use crate::profile::value::{
    field, is_populated, parse_flag, string_field, text_field, truthy, NumericInput,
};
use serde_yaml::{Mapping, Value};

/// Fields shared by every kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    /// Trimmed id text; `None` when missing or blank
    pub id: Option<String>,
    pub name: Option<String>,
}

impl Header {
    fn parse(map: &Mapping) -> Self {
        Self {
            id: text_field(map, "id"),
            name: text_field(map, "name"),
        }
    }
}

/// One pool endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Endpoint {
    pub base_url: Option<String>,
    pub model: Option<String>,
}

/// Shape of the `endpoints` field of a pool provider
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoints {
    Absent,
    /// Present but not a list
    NotAList,
    List(Vec<Endpoint>),
}

impl Endpoints {
    /// Entries that expose a base URL.
    pub fn usable(&self) -> Vec<&Endpoint> {
        match self {
            Endpoints::List(entries) => entries.iter().filter(|e| e.base_url.is_some()).collect(),
            Endpoints::Absent | Endpoints::NotAList => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiProfile {
    pub header: Header,
    /// Provider type as written (from `type`, else `provider`); defaults to `openai_compat`
    pub api_type: String,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub endpoints: Endpoints,
    pub has_members: bool,
    pub rpm: Option<NumericInput>,
    pub timeout: Option<NumericInput>,
    pub strict_concurrency: bool,
}

pub const DEFAULT_API_TYPE: &str = "openai_compat";

impl ApiProfile {
    fn parse(map: &Mapping) -> Self {
        let api_type = text_field(map, "type")
            .or_else(|| text_field(map, "provider"))
            .unwrap_or_else(|| DEFAULT_API_TYPE.to_string());

        let endpoints = match field(map, "endpoints") {
            None | Some(Value::Null) => Endpoints::Absent,
            Some(Value::Sequence(entries)) => Endpoints::List(
                entries
                    .iter()
                    .map(|entry| match entry {
                        Value::Mapping(m) => Endpoint {
                            base_url: text_field(m, "base_url").or_else(|| text_field(m, "baseUrl")),
                            model: text_field(m, "model"),
                        },
                        _ => Endpoint::default(),
                    })
                    .collect(),
            ),
            Some(_) => Endpoints::NotAList,
        };

        let has_members = match field(map, "members") {
            Some(Value::Sequence(members)) => !members.is_empty(),
            Some(other) => truthy(other),
            None => false,
        };

        Self {
            header: Header::parse(map),
            api_type,
            base_url: text_field(map, "base_url"),
            model: text_field(map, "model"),
            endpoints,
            has_members,
            rpm: NumericInput::from_field(map, "rpm"),
            timeout: NumericInput::from_field(map, "timeout"),
            strict_concurrency: field(map, "strict_concurrency")
                .map(parse_flag)
                .unwrap_or(false),
        }
    }
}

/// Placeholder every configured user template must carry
pub const SOURCE_PLACEHOLDER: &str = "{{source}}";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PromptProfile {
    pub header: Header,
    pub persona: Option<String>,
    pub style_rules: Option<String>,
    pub output_rules: Option<String>,
    pub system_template: Option<String>,
    pub user_template: Option<String>,
}

impl PromptProfile {
    fn parse(map: &Mapping) -> Self {
        Self {
            header: Header::parse(map),
            persona: string_field(map, "persona"),
            style_rules: string_field(map, "style_rules"),
            output_rules: string_field(map, "output_rules"),
            system_template: string_field(map, "system_template"),
            user_template: string_field(map, "user_template"),
        }
    }

    /// A blank template means "not configured yet" and is accepted.
    pub fn missing_source_placeholder(&self) -> bool {
        match self.user_template.as_deref() {
            Some(template) if !template.trim().is_empty() => !template.contains(SOURCE_PLACEHOLDER),
            _ => false,
        }
    }

    /// Lower-cased concatenation of every text section, in a fixed order.
    pub fn effective_text(&self) -> String {
        [
            &self.persona,
            &self.style_rules,
            &self.output_rules,
            &self.system_template,
            &self.user_template,
        ]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParserOptions {
    pub pattern: Option<String>,
    pub path: Option<String>,
    pub key: Option<String>,
    pub script: Option<String>,
    /// `parsers` or `candidates` is a non-empty list
    pub has_sub_parsers: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParserProfile {
    pub header: Header,
    pub parser_type: Option<String>,
    pub options: ParserOptions,
}

impl ParserProfile {
    fn parse(map: &Mapping) -> Self {
        let options = options_of(map);
        let non_empty_list =
            |key: &str| matches!(field(&options, key), Some(Value::Sequence(s)) if !s.is_empty());
        Self {
            header: Header::parse(map),
            parser_type: text_field(map, "type"),
            options: ParserOptions {
                pattern: text_field(&options, "pattern"),
                path: text_field(&options, "path"),
                key: text_field(&options, "key"),
                script: text_field(&options, "script"),
                has_sub_parsers: non_empty_list("parsers") || non_empty_list("candidates"),
            },
        }
    }

    /// Lower-cased parser type, for matching.
    pub fn type_slug(&self) -> Option<String> {
        self.parser_type.as_deref().map(str::to_ascii_lowercase)
    }
}

/// Keys accepted for the policy similarity threshold, in priority order
pub const SIMILARITY_KEYS: [&str; 3] = ["similarity_threshold", "similarity", "similarityThreshold"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyProfile {
    pub header: Header,
    pub policy_type: Option<String>,
    pub similarity_threshold: Option<NumericInput>,
}

impl PolicyProfile {
    fn parse(map: &Mapping) -> Self {
        let similarity_threshold = SIMILARITY_KEYS
            .iter()
            .find_map(|key| match field(map, key) {
                None | Some(Value::Null) => None,
                Some(value) => Some(value),
            })
            .and_then(NumericInput::from_value);
        Self {
            header: Header::parse(map),
            policy_type: text_field(map, "type"),
            similarity_threshold,
        }
    }
}

/// Normalized chunking strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkType {
    Line,
    Block,
}

impl ChunkType {
    /// `legacy` is the historical name of `block`.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "line" => Some(ChunkType::Line),
            "block" | "legacy" => Some(ChunkType::Block),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChunkType::Line => "line",
            ChunkType::Block => "block",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkProfile {
    pub header: Header,
    /// `chunk_type`, else legacy `type`, trimmed
    pub raw_type: Option<String>,
    pub target_chars: Option<NumericInput>,
    pub max_chars: Option<NumericInput>,
    pub balance_threshold: Option<NumericInput>,
    pub balance_count: Option<NumericInput>,
}

impl ChunkProfile {
    fn parse(map: &Mapping) -> Self {
        let options = options_of(map);
        Self {
            header: Header::parse(map),
            raw_type: text_field(map, "chunk_type").or_else(|| text_field(map, "type")),
            target_chars: NumericInput::from_field(&options, "target_chars"),
            max_chars: NumericInput::from_field(&options, "max_chars"),
            balance_threshold: NumericInput::from_field(&options, "balance_threshold"),
            balance_count: NumericInput::from_field(&options, "balance_count"),
        }
    }

    pub fn chunk_type(&self) -> Option<ChunkType> {
        self.raw_type.as_deref().and_then(ChunkType::from_raw)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineProfile {
    pub header: Header,
    pub provider: Option<String>,
    pub prompt: Option<String>,
    pub parser: Option<String>,
    pub line_policy: Option<String>,
    pub chunk_policy: Option<String>,
    /// Read with the boolean-flag parser, so "off"/"no"/"false"/"0" strings are false
    pub apply_line_policy: bool,
}

impl PipelineProfile {
    fn parse(map: &Mapping) -> Self {
        Self {
            header: Header::parse(map),
            provider: text_field(map, "provider"),
            prompt: text_field(map, "prompt"),
            parser: text_field(map, "parser"),
            line_policy: text_field(map, "line_policy"),
            chunk_policy: text_field(map, "chunk_policy"),
            apply_line_policy: is_populated(map, "apply_line_policy")
                && field(map, "apply_line_policy").map(parse_flag).unwrap_or(false),
        }
    }

    /// Populated references in checking order, paired with the kind they point at.
    pub fn references(&self) -> Vec<(&'static str, ProfileKind, &str)> {
        [
            ("provider", ProfileKind::Api, &self.provider),
            ("prompt", ProfileKind::Prompt, &self.prompt),
            ("parser", ProfileKind::Parser, &self.parser),
            ("line_policy", ProfileKind::Policy, &self.line_policy),
            ("chunk_policy", ProfileKind::Chunk, &self.chunk_policy),
        ]
        .into_iter()
        .filter_map(|(field, kind, value)| value.as_deref().map(|v| (field, kind, v)))
        .collect()
    }
}

/// A profile payload after the untyped-to-typed boundary
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileData {
    Api(ApiProfile),
    Prompt(PromptProfile),
    Parser(ParserProfile),
    Policy(PolicyProfile),
    Chunk(ChunkProfile),
    Pipeline(PipelineProfile),
}

impl ProfileData {
    /// Parse a (normalized) mapping as the given kind. Never fails: absent or
    /// malformed fields are carried as `None` for the validators to report.
    pub fn parse(kind: ProfileKind, map: &Mapping) -> Self {
        match kind {
            ProfileKind::Api => ProfileData::Api(ApiProfile::parse(map)),
            ProfileKind::Prompt => ProfileData::Prompt(PromptProfile::parse(map)),
            ProfileKind::Parser => ProfileData::Parser(ParserProfile::parse(map)),
            ProfileKind::Policy => ProfileData::Policy(PolicyProfile::parse(map)),
            ProfileKind::Chunk => ProfileData::Chunk(ChunkProfile::parse(map)),
            ProfileKind::Pipeline => ProfileData::Pipeline(PipelineProfile::parse(map)),
        }
    }

    pub fn kind(&self) -> ProfileKind {
        match self {
            ProfileData::Api(_) => ProfileKind::Api,
            ProfileData::Prompt(_) => ProfileKind::Prompt,
            ProfileData::Parser(_) => ProfileKind::Parser,
            ProfileData::Policy(_) => ProfileKind::Policy,
            ProfileData::Chunk(_) => ProfileKind::Chunk,
            ProfileData::Pipeline(_) => ProfileKind::Pipeline,
        }
    }

    pub fn header(&self) -> &Header {
        match self {
            ProfileData::Api(p) => &p.header,
            ProfileData::Prompt(p) => &p.header,
            ProfileData::Parser(p) => &p.header,
            ProfileData::Policy(p) => &p.header,
            ProfileData::Chunk(p) => &p.header,
            ProfileData::Pipeline(p) => &p.header,
        }
    }
}

fn options_of(map: &Mapping) -> Mapping {
    match field(map, "options") {
        Some(Value::Mapping(options)) => options.clone(),
        _ => Mapping::new(),
    }
}
