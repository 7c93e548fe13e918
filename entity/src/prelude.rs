pub use super::emotion_analyses::Entity as EmotionAnalyses;
pub use super::user_sessions::Entity as UserSessions;
