pub(crate) mod firestore;
