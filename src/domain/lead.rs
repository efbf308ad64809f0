/// Contact details forwarded to the marketing API exactly as they were submitted.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Lead {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
