pub mod answer;
pub mod grade;
pub mod question;
