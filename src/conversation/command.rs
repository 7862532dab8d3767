/// Text messages the bot understands; everything else goes to the advisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SaveMeal,
    History,
    Help,
    Advice(String),
}

impl Command {
    pub fn parse(text: &str) -> Self {
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        match normalized.as_str() {
            "save meal" | "บันทึกอาหาร" | "บันทึกมื้ออาหาร" => Command::SaveMeal,
            "history" | "ประวัติ" | "ประวัติการกิน" => Command::History,
            "help" | "ช่วยเหลือ" | "วิธีใช้" => Command::Help,
            _ => Command::Advice(text.trim().to_string()),
        }
    }
}
