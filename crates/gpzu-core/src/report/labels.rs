//! Wire labels of the parse result. Groups and fields are listed in output
//! order.

pub const GROUP_PARTICULARS: &str = "Реквизиты ГПЗУ";
pub const RECORD_ID: &str = "Уникальный номер записи";
pub const DOCUMENT_NUMBER: &str = "Номер документа ГПЗУ";
pub const ISSUE_DATE: &str = "Дата выдачи ГПЗУ";
pub const STATUS: &str = "Статус ГПЗУ";
pub const EXPIRY_DATE: &str = "Срок действия ГПЗУ";
pub const RIGHTSHOLDER: &str = "Правообладатель или иной получатель ГПЗУ";
pub const RIGHTSHOLDER_TYPE: &str = "Тип правообладателя или получателя ГПЗУ";

pub const GROUP_LOCATION: &str = "Территория (Местоположение) земельного участка (ЗУ)";
pub const ADMIN_DISTRICT: &str = "Административный округ";
pub const SETTLEMENT: &str = "Район (поселение)";
pub const BUILDING_ADDRESS: &str = "Строительный адрес";
pub const CAD_NUMBER: &str = "Кадастровый номер земельного участка (ЗУ) или условный номер";
pub const PPT_STATUS: &str =
    "Наличие проекта планировки территории (ППТ) в границах ГПЗУ реквизиты документа";
pub const PPT_DETAILS: &str = "Реквизиты документа ППТ";
pub const PMT_STATUS: &str = "Наличие отдельного проекта межевания территории в границах ГПЗУ";
pub const PMT_DETAILS: &str = "Реквизиты проекта межевания территории";

pub const GROUP_USEKINDS: &str = "Виды разрешенного использования земельного участка (ВРИ ЗУ)";
pub const USEKIND_GROUP: &str = "Наименование условной группы использования ЗУ по ВРИ";
pub const USEKIND_CODES: &str =
    "Коды основных видов разрешенного использования (ВРИ) земельного  участка (ЗУ)";

pub const GROUP_TERRITORY: &str = "Территориальные показатели ГПЗУ";
pub const PARCEL_AREA: &str = "Площадь земельного  участка (ЗУ), кв.м";
pub const SUBZONE_NUMBERS: &str = "Наличие подзон ЗУ, номера";
pub const SUBZONE_AREAS: &str = "Площади подзон ЗУ, кв.м";

pub const GROUP_LIMITS: &str = "Предельные параметры разрешенного строительства, реконструкции объектов капитального строительства (ОКС)";
pub const MAX_HEIGHT: &str = "Высота застройки , м";
pub const MAX_FLOORS: &str = "Количество надземных этажей, шт";
pub const MAX_DEV_PERCENT: &str = "Процент застроенности, %";
pub const MAX_DENSITY: &str = "Плотность застройки, тыс. кв. м/га";

pub const GROUP_NEW_OBJECTS: &str = "Параметры и площади строящихся и реконструируемых объектов капитального строительства (ОКС) на ЗУ";
pub const OBJECT_PURPOSE: &str = "Назначение ОКС";
pub const OBJECT_DESCRIPTION: &str = "Наименование, описание ОКС";
pub const UNREGULATED_OBJECTS: &str = "Наличие объектов на которые действие градостроительного регламента не распространяется или не устанавливается";
pub const FLOOR_AREAS: &str = "Суммарная поэтажная площадь наземной части зданий и сооружений в габаритах наружных стен, кв.м";
pub const TOTAL_AREAS: &str = "Общая площадь зданий и сооружений, кв.м";
pub const FLOOR_AREAS_SUM: &str = "Суммарная поэтажная площадь наземной части зданий и сооружений в габаритах наружных стен по всем подзонам, кв.м";
pub const TOTAL_AREAS_SUM: &str = "Общая площадь зданий и сооружений по всем подзонам, кв.м";

pub const GROUP_EXISTING_OBJECTS: &str =
    "Параметры и площади существующих на ЗУ объектов капитального строительства (ОКС)";
pub const EXISTING_OBJECTS_FIELDS: &[&str] = &[
    "Наличие или отсутствие существующих на ЗУ ОКС",
    "Общее число существующих ОКС, единиц",
    "Назначение существующих ОКС",
    "Наименование, описание существующих ОКС",
    "Максимальное число наземных этажей существующих ОКС",
    "Общая площадь существующих ОКС, кв.м",
];

pub const GROUP_HERITAGE: &str =
    "Объекты,включенные в единый государственный реестр объектов культурного наследия (ОКН)";
pub const HERITAGE_FIELDS: &[&str] = &[
    "Наличие или отсутствие существующих на ЗУ ОКН",
    "Общее число существующих на ЗУ ОКН",
    "Наименование, описание ОКН",
    "Идентификационный номер ОКН",
    "Регистрационный номер ОКН",
];

/// Area breakdown labels, keyed by the breakdown keys of a subzone.
pub const AREA_LABELS: &[(&str, &str)] = &[
    ("total", "Всего"),
    ("living", "Жилой застройки"),
    ("nonliving", "Нежилой застройки"),
    ("livingspace", "Жилых помещений"),
    ("builtin", "Встроенно-пристроенных, отдельно стоящих нежилых помещений"),
    ("underground", "Подземного пространства"),
];

pub const STATUS_APPROVED: &str = "Утвержден";
pub const STATUS_NOT_APPROVED: &str = "Не утвержден";

pub const LEGAL_ENTITY: &str = "ЮЛ";
pub const INDIVIDUAL: &str = "ФЛ или ИП";

pub const USEKIND_RESIDENTIAL: &str = "Жилая";
pub const USEKIND_NON_RESIDENTIAL: &str = "Нежилая";
pub const USEKIND_MIXED: &str = "Смешанная";

pub const PURPOSE_RESIDENTIAL: &str = "Жилое";
pub const PURPOSE_NON_RESIDENTIAL: &str = "Нежилое";

pub const PRESENT: &str = "Есть";
pub const ABSENT: &str = "Нет";

/// Label of an area breakdown key.
pub fn area_label(key: &str) -> Option<&'static str> {
    AREA_LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
}
