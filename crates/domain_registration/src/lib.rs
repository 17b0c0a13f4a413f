//! Registration Domain
//!
//! Everything around a registration that is not fee arithmetic:
//!
//! - **League**: jobs (one season of a league or tournament), their
//!   agegroups and divisions, and cloning a job into the next season
//! - **Club matching**: fuzzy matching of freehand club names
//! - **Membership**: USA Lacrosse membership verification behind a port
//! - **Tokens and HTML tables**: the text of confirmation e-mails and
//!   receipts

pub mod league;
pub mod club_match;
pub mod membership;
pub mod tokens;
pub mod html_table;
pub mod error;

pub use league::{Agegroup, Division, Job, JobClone, Season};
pub use club_match::{ClubMatch, ClubNameMatcher, DUPLICATE_THRESHOLD};
pub use membership::{
    evaluate, verify_member, HttpMembershipConfig, HttpMembershipVerifier,
    InMemoryMembershipVerifier, MembershipRecord, MembershipRequest, MembershipVerdict,
    MembershipVerifier,
};
pub use tokens::TokenReplacer;
pub use html_table::{currency_cell, escape_html, HtmlTableBuilder};
pub use error::{MembershipError, RegistrationError};
