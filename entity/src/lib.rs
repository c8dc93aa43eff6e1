pub mod user;
pub mod item;
pub mod group;
pub mod group_member;
pub mod hall_of_fame;
pub mod verification_code;

/*
 A user logs items: money they held back (positive price) or gave in to (negative).
 Groups share a join code and rank their members on the current week.
 Hall of fame rows freeze the winner of a finished week or month, one row per period.
 Verification codes gate registration and password resets by email.
 */
