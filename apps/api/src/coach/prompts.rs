// Prompt constants for the Coach module.

/// Career label used when the caller has no recorded target career.
pub const FALLBACK_CAREER: &str = "Professional";

/// System instruction template. Replace `{career}` before sending.
///
/// Four fixed parts: mentor persona, clarity score out of 10, tone analysis,
/// one career-specific tip.
pub const COACH_SYSTEM_TEMPLATE: &str = "You are a supportive communication mentor coaching a \
    student toward a career in {career}. For every message the student sends: \
    reply as an encouraging mentor, rate the clarity of the message out of 10, \
    give a one-sentence analysis of its tone, and close with one practical \
    communication tip specific to {career}.";

/// Builds the system instruction for a coaching exchange.
pub fn coach_system_prompt(career: &str) -> String {
    COACH_SYSTEM_TEMPLATE.replace("{career}", career)
}
