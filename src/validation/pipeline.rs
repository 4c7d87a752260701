//! Pipeline cross-validation.
//!
//! A pipeline names one profile of each other kind. Beyond its own required
//! fields, every populated reference must resolve, and the resolved profiles
//! must agree with each other: line chunking needs a line policy, and the
//! prompt has to ask for the output format the parser expects.

use crate::profile::{ChunkType, PipelineProfile, ProfileData, ProfileKind};
use crate::resolver::ProfileResolver;
use crate::validation::codes::ValidationCode;
use crate::validation::result::ValidationResult;
use tracing::trace;

/// Prompt keywords accepted for each output-format family
const TAGGED_MARKERS: [&str; 2] = ["@@", "[["];
const JSON_MARKERS: [&str; 1] = ["json"];
const JSONL_MARKERS: [&str; 3] = ["jsonl", "json lines", "jsonline"];

pub fn validate(pipeline: &PipelineProfile, resolver: &ProfileResolver, result: &mut ValidationResult) {
    let required = [
        ("provider", &pipeline.provider),
        ("prompt", &pipeline.prompt),
        ("parser", &pipeline.parser),
        ("chunk_policy", &pipeline.chunk_policy),
    ];
    for (field, value) in required {
        if value.is_none() {
            result.add_error(ValidationCode::MissingField(field));
        }
    }
    if pipeline.apply_line_policy && pipeline.line_policy.is_none() {
        result.add_error(ValidationCode::MissingField("line_policy"));
    }

    for (field, kind, reference) in pipeline.references() {
        if resolver.resolve(kind, reference).is_none() {
            trace!(field, kind = %kind, reference, "Pipeline reference did not resolve");
            result.add_error(ValidationCode::MissingReference {
                kind,
                reference: reference.to_string(),
            });
        }
    }

    check_chunk_line_policy(pipeline, resolver, result);
    check_prompt_parser_pairing(pipeline, resolver, result);
}

/// Line chunking and line policies only make sense together.
fn check_chunk_line_policy(
    pipeline: &PipelineProfile,
    resolver: &ProfileResolver,
    result: &mut ValidationResult,
) {
    let Some(chunk_ref) = pipeline.chunk_policy.as_deref() else {
        return;
    };
    let chunk_type = match resolver.load(ProfileKind::Chunk, chunk_ref).map(|p| p.typed()) {
        Some(ProfileData::Chunk(chunk)) => chunk.chunk_type(),
        _ => None,
    };

    if pipeline.apply_line_policy && matches!(chunk_type, Some(t) if t != ChunkType::Line) {
        result.add_error(ValidationCode::LinePolicyRequiresLineChunk);
    }
    if chunk_type == Some(ChunkType::Line) && pipeline.line_policy.is_none() {
        result.add_error(ValidationCode::LineChunkMissingLinePolicy);
    }
}

/// Keyword heuristic: the prompt text must mention the parser's output format.
/// Deliberately lenient; incidental mentions count.
fn check_prompt_parser_pairing(
    pipeline: &PipelineProfile,
    resolver: &ProfileResolver,
    result: &mut ValidationResult,
) {
    let (Some(prompt_ref), Some(parser_ref)) = (pipeline.prompt.as_deref(), pipeline.parser.as_deref())
    else {
        return;
    };
    let prompt = match resolver.load(ProfileKind::Prompt, prompt_ref).map(|p| p.typed()) {
        Some(ProfileData::Prompt(prompt)) => prompt,
        _ => return,
    };
    let parser = match resolver.load(ProfileKind::Parser, parser_ref).map(|p| p.typed()) {
        Some(ProfileData::Parser(parser)) => parser,
        _ => return,
    };

    if prompt.missing_source_placeholder() {
        result.add_error(ValidationCode::PromptMissingSource);
    }

    let text = prompt.effective_text();
    let mentions_any = |markers: &[&str]| markers.iter().any(|m| text.contains(m));

    match parser.type_slug().as_deref() {
        Some("tagged_line") if !mentions_any(&TAGGED_MARKERS) => {
            result.add_error(ValidationCode::ParserRequiresTaggedPrompt)
        }
        Some("json_object" | "json_array") if !mentions_any(&JSON_MARKERS) => {
            result.add_error(ValidationCode::ParserRequiresJsonPrompt)
        }
        Some("jsonl") if !mentions_any(&JSONL_MARKERS) => {
            result.add_error(ValidationCode::ParserRequiresJsonlPrompt)
        }
        _ => {}
    }
}
