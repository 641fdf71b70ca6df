// Prompt and wording constants for the cover-letter module.

/// Role-setting instruction sent as the system turn of every generation prompt.
pub const COVER_LETTER_SYSTEM: &str = "You are an experienced career coach and professional \
    writer. Write tailored, specific cover letters that connect the candidate's real \
    experience to the job's requirements. Use a confident, professional tone, keep the \
    letter under one page, and never invent employers, titles, or achievements that \
    are not in the resume.";

/// Opening line of the user turn in every generation prompt.
pub const COVER_LETTER_REQUEST: &str =
    "Please write a cover letter for the following job description:";

/// Heading for the optional caller-supplied context section.
pub const ADDITIONAL_CONTEXT_HEADING: &str = "ADDITIONAL INFORMATION:";

/// First turn of a fresh revision session.
pub const REVISION_SYSTEM: &str = "I am an AI assistant that helps with cover letter revisions.";

/// Assistant greeting that opens a fresh revision session.
pub const REVISION_GREETING: &str = "I've generated a cover letter based on your job \
    description and resume. What do you think? Would you like me to make any changes?";
