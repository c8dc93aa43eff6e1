use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodePurpose {
    Register,
    Reset,
}

impl CodePurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::Register => "register",
            CodePurpose::Reset => "reset",
        }
    }
}

impl fmt::Display for CodePurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RSendCode {
    pub email: String,
    pub purpose: CodePurpose,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RVerifyCode {
    pub email: String,
    pub code: String,
    pub purpose: CodePurpose,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SendCodeRes {
    pub message: String,
    pub expires_in_secs: i64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct VerifyCodeRes {
    pub valid: bool,
}
