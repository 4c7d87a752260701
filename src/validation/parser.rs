//! Parser profile checks. Only presence is checked for patterns, paths, and
//! scripts; their contents are not compiled or evaluated.

use crate::profile::ParserProfile;
use crate::validation::codes::ValidationCode;
use crate::validation::result::ValidationResult;

pub fn validate(parser: &ParserProfile, result: &mut ValidationResult) {
    let Some(parser_type) = parser.type_slug() else {
        result.add_error(ValidationCode::MissingField("type"));
        return;
    };
    let options = &parser.options;
    let has_json_path = options.path.is_some() || options.key.is_some();

    match parser_type.as_str() {
        "regex" if options.pattern.is_none() => result.add_error(ValidationCode::MissingPattern),
        "json_object" if !has_json_path => result.add_error(ValidationCode::MissingJsonPath),
        "jsonl" if !has_json_path => result.add_warning(ValidationCode::MissingJsonPath),
        "any" if !options.has_sub_parsers => result.add_error(ValidationCode::MissingAnyParsers),
        "python" if options.script.is_none() && options.path.is_none() => {
            result.add_error(ValidationCode::MissingScript)
        }
        _ => {}
    }
}
