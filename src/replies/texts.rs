// User-facing copy. Thai first, English in brackets or on the next line.

pub const NUTRITION_TITLE: &str = "ข้อมูลโภชนาการ (Nutrition)";
pub const CALORIES_LABEL: &str = "🔥 แคลอรี่ (Calories)";
pub const PROTEIN_LABEL: &str = "🥩 โปรตีน (Protein)";
pub const FAT_LABEL: &str = "🧈 ไขมัน (Fat)";
pub const CARBOHYDRATE_LABEL: &str = "🍚 คาร์โบไฮเดรต (Carbs)";
pub const SODIUM_LABEL: &str = "🧂 โซเดียม (Sodium)";
pub const INGREDIENTS_TITLE: &str = "🥗 วัตถุดิบ (Ingredients)";
pub const ADVICE_TITLE: &str = "💡 คำแนะนำ (Advice)";
pub const DISCLAIMER: &str = "* ค่าโภชนาการเป็นการประมาณโดย AI อาจคลาดเคลื่อนจากความจริง\n* Nutrition values are AI estimates and may be inaccurate.";
pub const CONFIRM_EAT_LABEL: &str = "กินเลย! (Eat) 🍽️";
pub const CONFIRM_EAT_DISPLAY: &str = "กินอันนี้ (I'm eating this)";
pub const DECLINE_LABEL: &str = "ไม่กิน (Skip)";
pub const DECLINE_DISPLAY: &str = "ไม่กินอันนี้ (Not eating this)";

pub const HISTORY_ALT: &str = "ประวัติการกิน (Meal history)";
pub const NO_LOCATION: &str = "ไม่มีข้อมูลตำแหน่ง (No location)";
pub const NO_HISTORY: &str = "ยังไม่มีประวัติการกิน ลองส่งรูปอาหารมาบันทึกกันเลย 📸\nNo meals recorded yet. Send me a photo of your food to start!";

pub const SAVE_MEAL_PROMPT: &str = "ส่งรูปอาหารที่กำลังจะกินมาได้เลย 📸\nSend me a photo of the meal you're about to eat.";
pub const TAKE_PHOTO_LABEL: &str = "ถ่ายรูป (Camera)";
pub const PICK_PHOTO_LABEL: &str = "เลือกรูป (Album)";

pub const HELP: &str = "🤖 MealMate ช่วยอะไรได้บ้าง (What I can do)\n\
📸 ส่งรูปอาหาร: วิเคราะห์โภชนาการ (Send a food photo for a nutrition estimate)\n\
📝 \"บันทึกอาหาร\" / \"save meal\": เริ่มบันทึกมื้ออาหาร (Start logging a meal)\n\
📖 \"ประวัติ\" / \"history\": ดู 5 มื้อล่าสุด (Your last 5 meals)\n\
💬 พิมพ์คำถามเรื่องอาหาร: รับคำแนะนำ (Ask any nutrition question)";

pub const LOCATION_PROMPT: &str = "📍 ต้องการบันทึกสถานที่กินด้วยไหม? กดปุ่มด้านล่างเพื่อแชร์ตำแหน่ง\nWant to add where you ate? Tap below to share your location.";
pub const SHARE_LOCATION_LABEL: &str = "แชร์ตำแหน่ง (Location)";
pub const DECLINED: &str = "โอเค ไม่บันทึกมื้อนี้นะ 👌\nOK, this meal won't be recorded.";
pub const NO_MEAL_FOR_LOCATION: &str = "ยังไม่มีมื้ออาหารให้แนบตำแหน่ง ลองส่งรูปอาหารก่อนนะ\nThere's no meal to attach this location to yet. Send a food photo first.";

pub const ANALYSIS_FAILED: &str = "ขออภัย ตอนนี้ไม่สามารถวิเคราะห์ได้ กรุณาลองใหม่อีกครั้งภายหลัง 🙏\nSorry, I can't analyse that right now. Please try again later.";
pub const SAVE_FAILED: &str = "ขออภัย ไม่สามารถบันทึกข้อมูลได้ กรุณาลองใหม่อีกครั้ง 🙏\nSorry, I couldn't save that. Please try again.";
pub const GENERIC_FAILURE: &str = "ขออภัย เกิดข้อผิดพลาด กรุณาลองใหม่อีกครั้ง 🙏\nSorry, something went wrong. Please try again.";
pub const ACTION_EXPIRED: &str = "ปุ่มนี้หมดอายุแล้ว กรุณาส่งรูปอาหารใหม่อีกครั้ง ⏰\nThis button has expired. Please send the food photo again.";

pub fn meal_saved(food_name: &str, calories: &str) -> String {
    format!("✅ บันทึก \"{food_name}\" ({calories}) เรียบร้อยแล้ว!\nSaved \"{food_name}\" ({calories}).")
}

pub fn meal_already_saved(food_name: &str) -> String {
    format!("มื้อ \"{food_name}\" ถูกบันทึกไว้แล้ว 👍\n\"{food_name}\" is already saved.")
}

pub fn location_saved(place: &str) -> String {
    format!("📍 บันทึกตำแหน่ง {place} เรียบร้อยแล้ว\nLocation {place} saved.")
}
