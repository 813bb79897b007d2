// All LLM instruction fragments for the Boolean module.
// The composer stitches these together; nothing here is sent on its own.

/// Role statement that opens every instruction.
pub const ROLE: &str = "You are an HR sourcing assistant.";

/// Extraction rule when only a job description is available.
pub const EXTRACT_FROM_JD: &str =
    "1. Extract 4-6 key skill buckets directly from the JOB DESCRIPTION below.";

/// Extraction rule when the user has supplied priority context (hard filter).
pub const EXTRACT_FROM_CONTEXT: &str =
    "1. Extract 3-5 MUST-HAVE skill buckets strictly from USER CONTEXT. \
    DO NOT invent new buckets from the Job Description.";

/// Synonym rule shared by both modes.
pub const SYNONYMS: &str = "2. For each bucket, list 4-8 synonyms or phrases as they appear on real resumes \
    (module names, abbreviations, domain jargon).";

/// Boolean composition rule shared by both modes.
pub const BOOLEAN_RULE: &str = "3. Build a Boolean search string: OR within buckets, AND between buckets; \
    append NOT-filters.";

/// Response shape the backend is asked (not forced) to follow.
pub const OUTPUT_TEMPLATE: &str = "Return Markdown in exactly this template:\n\
    ### Buckets\n\
    * <Bucket-1> – [syn1, syn2, …]\n\
    * <Bucket-2> – …\n\
    ### Boolean\n\
    <boolean string>";

/// Label for the priority context block. Only present in refinement instructions.
pub const CONTEXT_LABEL: &str = "USER CONTEXT (strict):";

pub const NOT_FILTERS_LABEL: &str = "NOT filters:";

/// JD label when the JD is the bucket source.
pub const JD_LABEL: &str = "Job Description:";

/// JD label when the JD may only contribute synonyms.
pub const JD_SYNONYM_ONLY_LABEL: &str =
    "Job Description (use only for additional synonyms, do NOT create new buckets):";

/// Separates the rules from the raw JD text.
pub const JD_SEPARATOR: &str = "---";
