//! User-facing copy for the companion form, per locale.
//!
//! Field labels, hints, validation messages, notification text, and the
//! submit label all come from a [`Messages`] catalog, so the workflow logic
//! never hard-codes language.

use companion_types::companion::FieldName;
use companion_types::config::Locale;

/// A complete catalog of user-facing strings for one locale.
#[derive(Debug)]
pub struct Messages {
    pub basics_title: &'static str,
    pub basics_subtitle: &'static str,
    pub configuration_title: &'static str,
    pub configuration_subtitle: &'static str,

    pub src_label: &'static str,
    pub name_label: &'static str,
    pub description_label: &'static str,
    pub category_label: &'static str,
    pub instructions_label: &'static str,
    pub seed_label: &'static str,

    pub name_hint: &'static str,
    pub description_hint: &'static str,
    pub category_hint: &'static str,
    pub instructions_hint: &'static str,
    pub seed_hint: &'static str,
    pub category_placeholder: &'static str,

    pub src_required: &'static str,
    pub name_required: &'static str,
    pub description_required: &'static str,
    pub category_required: &'static str,
    pub instructions_too_short: &'static str,
    pub seed_too_short: &'static str,

    /// Notification after a successful save.
    pub saved: &'static str,
    /// Generic notification after a failed save. Never carries transport detail.
    pub save_failed: &'static str,

    pub create_label: &'static str,
    pub edit_label: &'static str,
}

pub static EN: Messages = Messages {
    basics_title: "General Information",
    basics_subtitle: "General information about your Companion",
    configuration_title: "Configuration",
    configuration_subtitle: "Detailed instructions for AI behaviour",

    src_label: "Image",
    name_label: "Name",
    description_label: "Description",
    category_label: "Category",
    instructions_label: "Instructions",
    seed_label: "Example Conversation",

    name_hint: "This is how your AI Companion will be named.",
    description_hint: "Short description for your AI Companion",
    category_hint: "Select a category for your AI",
    instructions_hint: "Describe in detail your companion's backstory and relevant details.",
    seed_hint: "Write a couple of examples of a human chatting with your AI companion, write expected answers.",
    category_placeholder: "Select a category",

    src_required: "Image is required.",
    name_required: "Name is required.",
    description_required: "Description is required.",
    category_required: "Category is required.",
    instructions_too_short: "Instructions require at least 200 characters.",
    seed_too_short: "Example conversation requires at least 200 characters.",

    saved: "Success",
    save_failed: "Something went wrong...",

    create_label: "Create your companion",
    edit_label: "Edit your companion",
};

pub static RU: Messages = Messages {
    basics_title: "Основная Информация",
    basics_subtitle: "Основная информация о твоём Компаньоне",
    configuration_title: "Конфигурация",
    configuration_subtitle: "Детальная инструкция поведения для AI",

    src_label: "Изображение",
    name_label: "Имя",
    description_label: "Описание",
    category_label: "Категория",
    instructions_label: "Инструкция",
    seed_label: "Примеры Разговора",

    name_hint: "Таким образом ваш AI Компаньон будет назван.",
    description_hint: "Краткое описание вашего AI Компаньона",
    category_hint: "Выберите категорию для твоего AI",
    instructions_hint: "Подробно опишите предысторию вашего собеседника и соответствующие детали.",
    seed_hint: "Напишите пару примеров общения человека с вашим собеседником-искусственным интеллектом, напишите ожидаемые ответы.",
    category_placeholder: "Выбрать категорию",

    src_required: "Изображения обязательно.",
    name_required: "Имя обязательно.",
    description_required: "Описания обязательно.",
    category_required: "Категория обязательно.",
    instructions_too_short: "Инструкция обязательно и требует не менее 200 символов.",
    seed_too_short: "Заполнения обязательно и требует не менее 200 символов.",

    saved: "Успешно",
    save_failed: "Что-то пошло не так...",

    create_label: "Создать твоего компаньона",
    edit_label: "Редактировать твоего компаньона",
};

/// Catalog for the given locale.
pub fn for_locale(locale: Locale) -> &'static Messages {
    match locale {
        Locale::En => &EN,
        Locale::Ru => &RU,
    }
}

impl Messages {
    /// Message shown when `field` fails its rule.
    pub fn violation(&self, field: FieldName) -> &'static str {
        match field {
            FieldName::Src => self.src_required,
            FieldName::Name => self.name_required,
            FieldName::Description => self.description_required,
            FieldName::CategoryId => self.category_required,
            FieldName::Instructions => self.instructions_too_short,
            FieldName::Seed => self.seed_too_short,
        }
    }

    pub fn label(&self, field: FieldName) -> &'static str {
        match field {
            FieldName::Src => self.src_label,
            FieldName::Name => self.name_label,
            FieldName::Description => self.description_label,
            FieldName::CategoryId => self.category_label,
            FieldName::Instructions => self.instructions_label,
            FieldName::Seed => self.seed_label,
        }
    }

    /// Helper text shown under a field. The image picker has none.
    pub fn hint(&self, field: FieldName) -> Option<&'static str> {
        match field {
            FieldName::Src => None,
            FieldName::Name => Some(self.name_hint),
            FieldName::Description => Some(self.description_hint),
            FieldName::CategoryId => Some(self.category_hint),
            FieldName::Instructions => Some(self.instructions_hint),
            FieldName::Seed => Some(self.seed_hint),
        }
    }
}
