/// Order history page (profile/history): Vietnamese -> English
use super::TableProfile;
use crate::replacer::SubstitutionTable;
use once_cell::sync::Lazy;

const PAIRS: &[(&str, &str)] = &[
    // tabs and order statuses
    ("\"Tất cả\"", "\"All\""),
    ("'Tất cả'", "'All'"),
    ("\"Đơn hàng\"", "\"Order\""),
    ("'Hoàn thành'", "'Completed'"),
    ("'Đang giao'", "'Delivering'"),
    ("'Đã Xác Nhận'", "'Confirmed'"),
    ("'Đã xác nhận'", "'Confirmed'"),
    ("'Đã giao'", "'Completed'"),
    ("'Đã hủy'", "'Cancelled'"),
    // header
    ("Cá nhân hóa", "Personalized"),
    ("Lịch sử & Nhật ký Calo", "History & Calorie Log"),
    (
        "Theo dõi hành trình ăn uống của bạn. AI của chúng tôi phân tích dinh dưỡng từ lịch sử đặt hàng để giúp bạn sống khỏe hơn mỗi ngày.",
        "Track your eating journey. Our AI analyzes nutrition from your order history to help you live healthier every day.",
    ),
    // summary cards and order rows
    (">Trung bình / ngày<", ">Average / day<"),
    (">Đơn hàng tuần này<", ">Orders this week<"),
    (">đơn<", ">orders<"),
    (">Tổng tiền<", ">Total amount<"),
    (">Calo<", ">Calories<"),
    (">Chi tiết<", ">Details<"),
    (">Đặt lại<", ">Reorder<"),
    // calorie chart
    ("Biểu đồ Calo", "Calorie Chart"),
    (">Tuần này<", ">This week<"),
    (">T2<", ">Mon<"),
    (">T3<", ">Tue<"),
    (">T4<", ">Wed<"),
    (">T5<", ">Thu<"),
    (">T6<", ">Fri<"),
    (">T7<", ">Sat<"),
    (">CN<", ">Sun<"),
    ("Mục tiêu: 2000 kcal", "Goal: 2000 kcal"),
    ("Đạt 85%", "Reached 85%"),
    // advice card
    ("SmartBite AI Phân Tích", "SmartBite AI Analysis"),
    ("Lời khuyên tuần này", "This week's advice"),
    (
        "Chào bạn! Dựa trên lịch sử ăn uống, tuần này bạn đã tiêu thụ hơi nhiều tinh bột vào buổi tối. Hãy thử thay thế bằng các món Salad hoặc ức gà nướng vào bữa tối hôm nay để cân bằng nhé!",
        "Hello! Based on your eating history, you consumed a bit too many carbs at night this week. Try replacing them with Salads or grilled chicken breast for dinner today to balance things out!",
    ),
    ("Xem thực đơn đề xuất", "View suggested menu"),
    // nutrition intake
    ("Dinh dưỡng đã nạp", "Nutrition Intake"),
    (">Protein (Đạm)<", ">Protein<"),
    (">Carbs (Tinh bột)<", ">Carbs<"),
    (">Fat (Chất béo)<", ">Fat<"),
];

static TABLE: Lazy<SubstitutionTable> =
    Lazy::new(|| SubstitutionTable::from_pairs(PAIRS.iter().copied()));

pub struct OrderHistoryTable;

impl OrderHistoryTable {
    pub fn profile() -> TableProfile {
        TableProfile {
            id: "order-history",
            name: "Order history page",
            description: "Tabs, statuses, calorie chart and nutrition labels",
            table: TABLE.clone(),
        }
    }
}
