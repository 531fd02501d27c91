//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Session storage keys (shared with the web dashboard's local storage)
pub const STORAGE_KEY_TOKEN: &str = "userToken";
pub const STORAGE_KEY_USER_NAME: &str = "userName";

// Backend endpoints
pub const LOGIN_PATH: &str = "auth/login-web";
pub const ADMIN_PREFIX: &str = "admin";

// Pagination query keys understood by the Laravel paginator
pub const PAGE_PARAM: &str = "page";
pub const PER_PAGE_PARAM: &str = "per_page";

// HTTP status codes with contractual meaning
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_UNPROCESSABLE: u16 = 422;

// User-facing fallback messages (Arabic, as shown in the dashboard toasts)
pub const MSG_GENERIC_FAILURE: &str = "حدث خطأ غير متوقع، يرجى المحاولة مرة أخرى";
pub const MSG_NETWORK_FAILURE: &str = "تعذر الاتصال بالخادم، تحقق من الاتصال بالإنترنت";
pub const MSG_INVALID_RESPONSE: &str = "استجابة غير صالحة من الخادم";
pub const MSG_SESSION_MISSING: &str = "يرجى تسجيل الدخول أولاً";
pub const MSG_REQUEST_CANCELLED: &str = "تم إلغاء الطلب";
pub const MSG_REQUEST_IN_FLIGHT: &str = "جاري تنفيذ الطلب، يرجى الانتظار";
pub const MSG_VALIDATION_FAILED: &str = "يرجى التحقق من البيانات المدخلة";
pub const MSG_NAME_TAKEN: &str = "الاسم مستخدم بالفعل";
pub const MSG_NOT_FOUND: &str = "العنصر غير موجود";
pub const MSG_FIELD_REQUIRED: &str = "هذا الحقل مطلوب";
pub const MSG_INVALID_EMAIL: &str = "البريد الإلكتروني غير صالح";
pub const MSG_INVALID_PHONE: &str = "رقم الهاتف غير صالح";
pub const MSG_INVALID_CHOICE: &str = "القيمة المختارة غير صالحة";
pub const MSG_MUST_BE_POSITIVE: &str = "يجب أن تكون القيمة أكبر من صفر";
pub const MSG_MUST_NOT_BE_NEGATIVE: &str = "لا يمكن أن تكون القيمة سالبة";
pub const MSG_ITEMS_REQUIRED: &str = "يجب إضافة صنف واحد على الأقل";
pub const MSG_PASSWORD_TOO_SHORT: &str = "كلمة المرور يجب ألا تقل عن 6 أحرف";

// Client-side validation limits
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const PHONE_PATTERN: &str = r"^\+?[0-9]{6,15}$";
