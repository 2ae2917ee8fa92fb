#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleDatabase,
    ConfigModuleTasks,
    PromptSelectModules,
    PromptDbFileName,
    PromptDefaultSort,
    PromptDisplayColumns,
    PromptConfirmBeforeDelete,

    // === DATABASE MESSAGES ===
    StatementFailed(String, String), // statement, parameter names
    ConstraintViolation(String),     // table
    DatabasePath(String),
    DatabaseNotFound(String), // path
    ConfirmDropDatabase,
    DatabaseDropped,

    // === TASK MESSAGES ===
    TaskCreated(String), // name
    TaskUpdated(i64),
    TaskCompleted(i64),
    TaskDeleted(i64),
    TasksDeletedCount(usize),
    TaskNotFound(String), // id or name
    TaskNameRequired,
    TaskNameTooLong(usize),        // limit
    TaskDescriptionTooLong(usize), // limit
    TaskDueBeforeStart,
    TaskCompletedBeforeCreated,
    TaskPriorityOutOfRange(i64, i64, i64), // value, min, max
    TaskFieldUnknown(String),
    TaskFieldValueInvalid(String, String), // field, value
    TasksHeader,
    NoTasksFound,
    SortMethodsHeader,
    UnknownSortMethod(String, String), // name, known names
    ConfirmDeleteTask(String),
    ConfirmDeleteTasks(usize),
    PromptTaskName,
    PromptTaskDescription,
    PromptTaskDueTime,
    PromptTaskPriority,
    PromptTaskCategory,
    SelectTaskAction,
    SelectTaskToComplete,
    SelectTaskToDelete,

    // === CATEGORY MESSAGES ===
    CategoryCreated(String),
    CategoryNotFound(String),
    CategoryAlreadyExists(String),
    CategoryDeactivated(String),
    ConfirmDeactivateCategory(String),
    CategoriesHeader,
    NoCategoriesFound,
    PromptCategoryName,
    PromptCategoryDescription,
    PromptCategoryColor,
    SelectCategoryAction,
    SelectCategoryToDeactivate,

    // === TAG MESSAGES ===
    TagCreated(String),
    TagNotFound(String),
    TagAlreadyExists(String),
    TagDeactivated(String),
    ConfirmDeactivateTag(String),
    TagsHeader,
    NoTagsFound,
    TasksWithTag(String),
    NoTasksWithTag(String),
    PromptTagName,
    PromptTagDescription,
    SelectTagAction,
    SelectTagToDeactivate,

    // === REMINDER MESSAGES ===
    ReminderCreated(String), // reminder time
    ReminderNotFound(i64),
    ReminderMarkedSent(i64),
    ReminderDeactivated(i64),
    RemindersHeader,
    NoRemindersFound,
    PromptReminderTaskId,
    PromptReminderTime,
    SelectReminderAction,

    // === RECURRENCE MESSAGES ===
    RecurrenceCreated(i64), // task id
    RecurrenceNotFound(i64),
    RecurrenceIntervalInvalid(i64),
    RecurrenceAdvanced(i64, String), // id, new start
    RecurrenceExhausted(i64),
    RecurrenceDeactivated(i64),
    RecurrencesHeader,
    NoRecurrencesFound,
    PromptRecurrenceTaskId,
    PromptRecurrenceInterval,
    PromptRecurrenceStart,
    PromptRecurrenceEnd,
    SelectRecurrenceAction,

    // === SETTING MESSAGES ===
    SettingSet(String), // key
    SettingValue(String, String), // key, value
    SettingNotFound(String),
    SettingNotNumeric(String, String), // key, value
    SettingsHeader,
    PromptSettingKey,
    PromptSettingValue,
    SelectSettingAction,

    // === INPUT MESSAGES ===
    InvalidDateTimeInput(String),
    InvalidKeyValuePair(String),
    UnknownColumn(String),
    OperationCancelled,
}
