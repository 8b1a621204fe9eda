pub const WELCOME: &str = "Welcome to the attractions data bot! \
Choose which data format you want to work with.";
pub const SEND_FILE: &str = "Send a file in the chosen format.";
pub const CHOOSE_UPLOAD_FORMAT: &str = "Choose the extension of the file you want to upload.";
pub const UNKNOWN_COMMAND: &str = "Unknown command! Starting over.";

pub const FORMAT_NOT_CHOSEN: &str = "The file format hasn't been chosen yet!";
pub const WRONG_EXTENSION: &str = "The file has the wrong extension, try again.";
pub const INCORRECT_DATA: &str = "The file contains incorrect data, send another file.";
pub const READ_FAILED: &str = "Something went wrong while reading the file, send another file.";
pub const FILE_LOADED: &str = "Great! Now choose the next step.";

pub const NO_DATA: &str = "You haven't uploaded a file yet. Choose a format and send a file first.";

pub const CHOOSE_SORT: &str = "Choose the sort field and order.";
pub const SORTED: &str = "Data sorted successfully. You can download the file \
or keep working with the modified data.";

pub const CHOOSE_FILTER_FIELD: &str = "Choose the fields to filter by.";
pub const INVALID_FILTER_FIELD: &str = "That is not a valid filter field, try again.";
pub const CHOOSE_FILTER_VALUE: &str = "Choose a value to filter by.";
pub const NO_FILTER_FIELD: &str = "You haven't chosen a filter field yet!";
pub const EMPTY_SET: &str = "The attraction list is empty now, filtering needs some values. \
You can upload a new file.";
pub const FILTER_DONE: &str = "Filtering done. You can keep working with the filtered data \
or download the file.";

pub const CHOOSE_DOWNLOAD_FORMAT: &str = "Choose the format to download the data in.";
pub const INVALID_DOWNLOAD: &str = "Wrong download command, try again.";
pub const DATA_SENT: &str = "Data sent successfully!";
pub const DOWNLOAD_FAILED: &str = "Something went wrong while preparing the download :( \
Send another file.";
pub const TRANSPORT_FAILED: &str = "Something went wrong while sending the data :( \
Send another file.";
pub const BUSY: &str = "Still working on your previous messages, please resend this one in a moment.";
