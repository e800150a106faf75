// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Handler status codes as a Rust error

use storebridge_abi::constants::*;

pub type StorageResult<T = ()> = Result<T, StorageError>;

/// A failure an engine reports to the host
///
/// Every variant is one of the host's handler status codes; [`StorageError::code`] gives the value
/// that crosses the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[repr(i32)]
pub enum StorageError {
	#[error("didn't find key on read or update")]
	KeyNotFound = HA_ERR_KEY_NOT_FOUND,
	#[error("duplicate key on write")]
	DuplicateKey = HA_ERR_FOUND_DUPP_KEY,
	#[error("internal error")]
	InternalError = HA_ERR_INTERNAL_ERROR,
	#[error("record changed since it was read")]
	RecordChanged = HA_ERR_RECORD_CHANGED,
	#[error("wrong index given to function")]
	WrongIndex = HA_ERR_WRONG_INDEX,
	#[error("index file is crashed")]
	Crashed = HA_ERR_CRASHED,
	#[error("record file is crashed")]
	WrongInRecord = HA_ERR_WRONG_IN_RECORD,
	#[error("out of memory")]
	OutOfMemory = HA_ERR_OUT_OF_MEM,
	#[error("initialization failed and should be retried")]
	RetryInit = HA_ERR_RETRY_INIT,
	#[error("not a table file")]
	NotATable = HA_ERR_NOT_A_TABLE,
	#[error("command not supported")]
	WrongCommand = HA_ERR_WRONG_COMMAND,
	#[error("old database file")]
	OldFile = HA_ERR_OLD_FILE,
	#[error("no record read in update")]
	NoActiveRecord = HA_ERR_NO_ACTIVE_RECORD,
	#[error("a record is not there")]
	RecordDeleted = HA_ERR_RECORD_DELETED,
	#[error("no more room in record file")]
	RecordFileFull = HA_ERR_RECORD_FILE_FULL,
	#[error("no more room in index file")]
	IndexFileFull = HA_ERR_INDEX_FILE_FULL,
	#[error("end in next/prev/first/last")]
	EndOfFile = HA_ERR_END_OF_FILE,
	#[error("unsupported extension used")]
	Unsupported = HA_ERR_UNSUPPORTED,
	#[error("too big row")]
	TooBigRow = HA_ERR_TO_BIG_ROW,
	#[error("wrong create option")]
	WrongCreateOption = HA_WRONG_CREATE_OPTION,
	#[error("duplicate unique on write")]
	DuplicateUnique = HA_ERR_FOUND_DUPP_UNIQUE,
	#[error("can't open charset")]
	UnknownCharset = HA_ERR_UNKNOWN_CHARSET,
	#[error("conflicting tables in MERGE")]
	WrongMrgTableDef = HA_ERR_WRONG_MRG_TABLE_DEF,
	#[error("last (automatic?) repair failed")]
	CrashedOnRepair = HA_ERR_CRASHED_ON_REPAIR,
	#[error("table must be repaired")]
	CrashedOnUsage = HA_ERR_CRASHED_ON_USAGE,
	#[error("lock wait timeout")]
	LockWaitTimeout = HA_ERR_LOCK_WAIT_TIMEOUT,
	#[error("lock table full")]
	LockTableFull = HA_ERR_LOCK_TABLE_FULL,
	#[error("updates not allowed")]
	ReadOnlyTransaction = HA_ERR_READ_ONLY_TRANSACTION,
	#[error("lock deadlock")]
	LockDeadlock = HA_ERR_LOCK_DEADLOCK,
	#[error("cannot add a foreign key constraint")]
	CannotAddForeign = HA_ERR_CANNOT_ADD_FOREIGN,
	#[error("cannot add a child row")]
	NoReferencedRow = HA_ERR_NO_REFERENCED_ROW,
	#[error("cannot delete a parent row")]
	RowIsReferenced = HA_ERR_ROW_IS_REFERENCED,
	#[error("no savepoint with that name")]
	NoSavepoint = HA_ERR_NO_SAVEPOINT,
	#[error("non unique key block size")]
	NonUniqueBlockSize = HA_ERR_NON_UNIQUE_BLOCK_SIZE,
	#[error("the table does not exist in engine")]
	NoSuchTable = HA_ERR_NO_SUCH_TABLE,
	#[error("the table existed in storage engine")]
	TableExist = HA_ERR_TABLE_EXIST,
	#[error("could not connect to storage engine")]
	NoConnection = HA_ERR_NO_CONNECTION,
	#[error("NULLs are not supported in spatial index")]
	NullInSpatial = HA_ERR_NULL_IN_SPATIAL,
	#[error("the table changed in storage engine")]
	TableDefChanged = HA_ERR_TABLE_DEF_CHANGED,
	#[error("there's no partition in table for given value")]
	NoPartitionFound = HA_ERR_NO_PARTITION_FOUND,
	#[error("row-based binlogging of row failed")]
	RbrLoggingFailed = HA_ERR_RBR_LOGGING_FAILED,
	#[error("index needed in foreign key constraint")]
	DropIndexFk = HA_ERR_DROP_INDEX_FK,
	#[error("upholding foreign key constraints would lead to a duplicate key error in another table")]
	ForeignDuplicateKey = HA_ERR_FOREIGN_DUPLICATE_KEY,
	#[error("the table needs an upgrade")]
	TableNeedsUpgrade = HA_ERR_TABLE_NEEDS_UPGRADE,
	#[error("the table is not writable")]
	TableReadonly = HA_ERR_TABLE_READONLY,
	#[error("failed to get next autoinc value")]
	AutoincReadFailed = HA_ERR_AUTOINC_READ_FAILED,
	#[error("failed to set row autoinc value")]
	AutoincErange = HA_ERR_AUTOINC_ERANGE,
	#[error("generic error")]
	Generic = HA_ERR_GENERIC,
	#[error("row not actually updated: new values same as the old values")]
	RecordIsTheSame = HA_ERR_RECORD_IS_THE_SAME,
	#[error("it is not possible to log this statement")]
	LoggingImpossible = HA_ERR_LOGGING_IMPOSSIBLE,
	#[error("the event was corrupt, leading to illegal data being read")]
	CorruptEvent = HA_ERR_CORRUPT_EVENT,
	#[error("new file format")]
	NewFile = HA_ERR_NEW_FILE,
	#[error("the event could not be processed")]
	RowsEventApply = HA_ERR_ROWS_EVENT_APPLY,
	#[error("error during initialization")]
	Initialization = HA_ERR_INITIALIZATION,
	#[error("file too short")]
	FileTooShort = HA_ERR_FILE_TOO_SHORT,
	#[error("wrong CRC on page")]
	WrongCrc = HA_ERR_WRONG_CRC,
}

impl StorageError {
	const ALL: [StorageError; 56] = [
		StorageError::KeyNotFound,
		StorageError::DuplicateKey,
		StorageError::InternalError,
		StorageError::RecordChanged,
		StorageError::WrongIndex,
		StorageError::Crashed,
		StorageError::WrongInRecord,
		StorageError::OutOfMemory,
		StorageError::RetryInit,
		StorageError::NotATable,
		StorageError::WrongCommand,
		StorageError::OldFile,
		StorageError::NoActiveRecord,
		StorageError::RecordDeleted,
		StorageError::RecordFileFull,
		StorageError::IndexFileFull,
		StorageError::EndOfFile,
		StorageError::Unsupported,
		StorageError::TooBigRow,
		StorageError::WrongCreateOption,
		StorageError::DuplicateUnique,
		StorageError::UnknownCharset,
		StorageError::WrongMrgTableDef,
		StorageError::CrashedOnRepair,
		StorageError::CrashedOnUsage,
		StorageError::LockWaitTimeout,
		StorageError::LockTableFull,
		StorageError::ReadOnlyTransaction,
		StorageError::LockDeadlock,
		StorageError::CannotAddForeign,
		StorageError::NoReferencedRow,
		StorageError::RowIsReferenced,
		StorageError::NoSavepoint,
		StorageError::NonUniqueBlockSize,
		StorageError::NoSuchTable,
		StorageError::TableExist,
		StorageError::NoConnection,
		StorageError::NullInSpatial,
		StorageError::TableDefChanged,
		StorageError::NoPartitionFound,
		StorageError::RbrLoggingFailed,
		StorageError::DropIndexFk,
		StorageError::ForeignDuplicateKey,
		StorageError::TableNeedsUpgrade,
		StorageError::TableReadonly,
		StorageError::AutoincReadFailed,
		StorageError::AutoincErange,
		StorageError::Generic,
		StorageError::RecordIsTheSame,
		StorageError::LoggingImpossible,
		StorageError::CorruptEvent,
		StorageError::NewFile,
		StorageError::RowsEventApply,
		StorageError::Initialization,
		StorageError::FileTooShort,
		StorageError::WrongCrc,
	];

	/// The host status code
	pub const fn code(self) -> i32 {
		self as i32
	}

	/// The error for a host status code, `None` for success and unknown codes
	pub fn from_code(code: i32) -> Option<Self> {
		Self::ALL.iter().copied().find(|err| err.code() == code)
	}
}

/// Status code for an engine result
pub fn status(result: StorageResult) -> i32 {
	match result {
		Ok(()) => HA_OK,
		Err(err) => err.code(),
	}
}
