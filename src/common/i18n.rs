// src/common/i18n.rs

//! Message catalog for every user-facing error string.
//!
//! Russian is the default language of the bots and the admin panel; English
//! is served when the caller asks for it through `Accept-Language`.

use crate::common::error::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    Ru,
    En,
}

impl Lang {
    /// Maps a primary language subtag ("ru", "en") to a supported language.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "en" => Lang::En,
            _ => Lang::Ru,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    InvalidPayload,
    InvalidParameters,
    RouteNotFound,
    InvalidCredentials,
    NotAuthenticated,
    InvalidToken,
    Forbidden,
    NotFound,
    HasDependents,
    ReferenceNotFound,
    DuplicateChatId,
    UsernameTaken,
    Internal,
}

pub fn text(lang: Lang, key: MessageKey) -> &'static str {
    use MessageKey::*;
    match (lang, key) {
        (Lang::Ru, InvalidPayload) => "Одно или несколько полей заполнены неверно.",
        (Lang::En, InvalidPayload) => "One or more fields are invalid.",
        (Lang::Ru, InvalidParameters) => "Некорректные параметры запроса.",
        (Lang::En, InvalidParameters) => "Invalid request parameters.",
        (Lang::Ru, RouteNotFound) => "Страница не найдена.",
        (Lang::En, RouteNotFound) => "Not found.",
        (Lang::Ru, InvalidCredentials) => "Невозможно войти с предоставленными учётными данными.",
        (Lang::En, InvalidCredentials) => "Unable to log in with provided credentials.",
        (Lang::Ru, NotAuthenticated) => "Учётные данные не были предоставлены.",
        (Lang::En, NotAuthenticated) => "Authentication credentials were not provided.",
        (Lang::Ru, InvalidToken) => "Недействительный токен.",
        (Lang::En, InvalidToken) => "Invalid token.",
        (Lang::Ru, Forbidden) => "У вас недостаточно прав для выполнения данного действия.",
        (Lang::En, Forbidden) => "You do not have permission to perform this action.",
        (Lang::Ru, NotFound) => "Объект не найден",
        (Lang::En, NotFound) => "Not found",
        (Lang::Ru, HasDependents) => "Невозможно удалить: на объект ссылаются другие записи",
        (Lang::En, HasDependents) => "Cannot delete: other records still reference it",
        (Lang::Ru, ReferenceNotFound) => "Связанный объект не существует.",
        (Lang::En, ReferenceNotFound) => "A referenced object does not exist.",
        (Lang::Ru, DuplicateChatId) => "Житель с таким tg_id уже существует.",
        (Lang::En, DuplicateChatId) => "A resident with this tg_id already exists.",
        (Lang::Ru, UsernameTaken) => "Пользователь с таким именем уже существует.",
        (Lang::En, UsernameTaken) => "A user with that username already exists.",
        (Lang::Ru, Internal) => "Внутренняя ошибка сервера.",
        (Lang::En, Internal) => "Internal server error.",
    }
}

pub fn entity_label(lang: Lang, entity: Entity) -> &'static str {
    use Entity::*;
    match (lang, entity) {
        (Lang::Ru, City) => "город",
        (Lang::En, City) => "city",
        (Lang::Ru, Building) => "адрес",
        (Lang::En, Building) => "address",
        (Lang::Ru, HousingComplex) => "жилой комплекс",
        (Lang::En, HousingComplex) => "housing complex",
        (Lang::Ru, House) => "жилой дом",
        (Lang::En, House) => "house",
        (Lang::Ru, Office) => "управляющая компания",
        (Lang::En, Office) => "office",
        (Lang::Ru, Department) => "отдел",
        (Lang::En, Department) => "department",
        (Lang::Ru, Position) => "должность",
        (Lang::En, Position) => "position",
        (Lang::Ru, Employee) => "сотрудник",
        (Lang::En, Employee) => "employee",
        (Lang::Ru, Service) => "типовая задача",
        (Lang::En, Service) => "service",
        (Lang::Ru, WorkSchedule) => "график работы",
        (Lang::En, WorkSchedule) => "work schedule",
        (Lang::Ru, WorkDay) => "рабочий день",
        (Lang::En, WorkDay) => "work day",
        (Lang::Ru, Request) => "заявка",
        (Lang::En, Request) => "request",
        (Lang::Ru, Task) => "задача",
        (Lang::En, Task) => "task",
        (Lang::Ru, User) => "пользователь",
        (Lang::En, User) => "user",
        (Lang::Ru, BotSettings) => "настройки ботов",
        (Lang::En, BotSettings) => "bot settings",
    }
}

/// Translates a validator error code into a field message. Unknown codes
/// fall back to the message attached at the validation site.
pub fn field_message(lang: Lang, code: &str, fallback: Option<&str>) -> String {
    let known = match (lang, code) {
        (Lang::Ru, "required") => Some("Обязательное поле."),
        (Lang::En, "required") => Some("This field is required."),
        (Lang::Ru, "length") => Some("Недопустимая длина значения."),
        (Lang::En, "length") => Some("Invalid value length."),
        (Lang::Ru, "range") => Some("Значение вне допустимого диапазона."),
        (Lang::En, "range") => Some("Value is out of range."),
        (Lang::Ru, "time_order") => Some("Время начала должно быть раньше времени окончания."),
        (Lang::En, "time_order") => Some("Start time must be earlier than end time."),
        (Lang::Ru, "times_required") => {
            Some("Для рабочего дня нужно указать время начала и окончания.")
        }
        (Lang::En, "times_required") => Some("A working day needs both start and end time."),
        _ => None,
    };

    match (known, fallback) {
        (Some(message), _) => message.to_string(),
        (None, Some(message)) => message.to_string(),
        (None, None) => code.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tags_fall_back_to_russian() {
        assert_eq!(Lang::from_tag("de"), Lang::Ru);
        assert_eq!(Lang::from_tag("EN"), Lang::En);
    }

    #[test]
    fn field_message_prefers_catalog_over_fallback() {
        assert_eq!(
            field_message(Lang::En, "required", Some("custom")),
            "This field is required."
        );
        assert_eq!(field_message(Lang::Ru, "phone", Some("Телефон")), "Телефон");
        assert_eq!(field_message(Lang::Ru, "phone", None), "phone");
    }
}
