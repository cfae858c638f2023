//! Domain model <-> wire DTO conversions.
//!
//! Calendar days are rendered as `YYYY-MM-DD`, timestamps as RFC 3339.

use crate::domain::commands::attendance::AttendanceSummaryResult;
use crate::domain::commands::fees::DefaulterEntry;
use crate::domain::commands::marks::StudentMarksSummary;
use crate::domain::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::domain::models::fee::{FeePayment, FeeRecord, FeeStatus};
use crate::domain::models::leave::{LeaveApplication, LeaveStatus};
use crate::domain::models::mark::MarkRecord;
use crate::domain::models::qr_session::QrSession;
use crate::domain::models::student::Student;

fn day_string(date: chrono::NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn student_to_dto(student: Student) -> shared::Student {
    shared::Student {
        id: student.id,
        roll_no: student.roll_no,
        name: student.name,
        email: student.email,
        semester: student.semester,
        created_at: student.created_at.to_rfc3339(),
    }
}

pub(crate) fn attendance_status_to_dto(status: AttendanceStatus) -> shared::AttendanceStatus {
    match status {
        AttendanceStatus::Present => shared::AttendanceStatus::Present,
        AttendanceStatus::Absent => shared::AttendanceStatus::Absent,
        AttendanceStatus::Late => shared::AttendanceStatus::Late,
        AttendanceStatus::Leave => shared::AttendanceStatus::Leave,
    }
}

pub(crate) fn attendance_status_from_dto(status: shared::AttendanceStatus) -> AttendanceStatus {
    match status {
        shared::AttendanceStatus::Present => AttendanceStatus::Present,
        shared::AttendanceStatus::Absent => AttendanceStatus::Absent,
        shared::AttendanceStatus::Late => AttendanceStatus::Late,
        shared::AttendanceStatus::Leave => AttendanceStatus::Leave,
    }
}

pub(crate) fn attendance_record_to_dto(record: AttendanceRecord) -> shared::AttendanceRecord {
    shared::AttendanceRecord {
        id: record.id,
        student_id: record.student_id,
        date: day_string(record.date),
        status: attendance_status_to_dto(record.status),
        marked_at: record.marked_at.to_rfc3339(),
        session_id: record.session_id,
    }
}

pub(crate) fn attendance_summary_to_dto(
    summary: AttendanceSummaryResult,
) -> shared::AttendanceSummary {
    shared::AttendanceSummary {
        student_id: summary.student_id,
        total_days: summary.total_days,
        present: summary.present,
        absent: summary.absent,
        late: summary.late,
        leave: summary.leave,
        percentage: summary.percentage,
    }
}

pub(crate) fn qr_session_to_dto(session: QrSession) -> shared::QrSession {
    shared::QrSession {
        id: session.id,
        code: session.code,
        teacher_id: session.teacher_id,
        subject_id: session.subject_id,
        date: day_string(session.date),
        expires_at: session.expires_at.to_rfc3339(),
        is_active: session.is_active,
        ended_at: session.ended_at.map(|t| t.to_rfc3339()),
        scanned_by: session.scanned_by,
    }
}

pub(crate) fn fee_status_to_dto(status: FeeStatus) -> shared::FeeStatus {
    match status {
        FeeStatus::Pending => shared::FeeStatus::Pending,
        FeeStatus::Partial => shared::FeeStatus::Partial,
        FeeStatus::Paid => shared::FeeStatus::Paid,
    }
}

fn fee_payment_to_dto(payment: FeePayment) -> shared::FeePayment {
    shared::FeePayment {
        amount: payment.amount,
        date: payment.date.to_rfc3339(),
        method: payment.method,
        receipt_no: payment.receipt_no,
    }
}

pub(crate) fn fee_record_to_dto(record: FeeRecord) -> shared::FeeRecord {
    shared::FeeRecord {
        id: record.id,
        student_id: record.student_id,
        semester_id: record.semester_id,
        total_amount: record.total_amount,
        paid_amount: record.paid_amount,
        due_date: record.due_date.map(day_string),
        status: fee_status_to_dto(record.status),
        payments: record.payments.into_iter().map(fee_payment_to_dto).collect(),
    }
}

pub(crate) fn defaulter_to_dto(entry: DefaulterEntry) -> shared::DefaulterEntry {
    shared::DefaulterEntry {
        record: fee_record_to_dto(entry.record),
        balance: entry.balance,
        overdue_days: entry.overdue_days,
    }
}

pub(crate) fn leave_status_to_dto(status: LeaveStatus) -> shared::LeaveStatus {
    match status {
        LeaveStatus::Pending => shared::LeaveStatus::Pending,
        LeaveStatus::Approved => shared::LeaveStatus::Approved,
        LeaveStatus::Rejected => shared::LeaveStatus::Rejected,
    }
}

pub(crate) fn leave_status_from_dto(status: shared::LeaveStatus) -> LeaveStatus {
    match status {
        shared::LeaveStatus::Pending => LeaveStatus::Pending,
        shared::LeaveStatus::Approved => LeaveStatus::Approved,
        shared::LeaveStatus::Rejected => LeaveStatus::Rejected,
    }
}

pub(crate) fn leave_application_to_dto(application: LeaveApplication) -> shared::LeaveApplication {
    shared::LeaveApplication {
        id: application.id,
        student_id: application.student_id,
        start_date: day_string(application.start_date),
        end_date: day_string(application.end_date),
        days: application.days,
        reason: application.reason,
        leave_type: application.leave_type,
        status: leave_status_to_dto(application.status),
        approved_by: application.approved_by,
        rejection_reason: application.rejection_reason,
    }
}

pub(crate) fn mark_record_to_dto(record: MarkRecord) -> shared::MarkRecord {
    shared::MarkRecord {
        id: record.id,
        student_id: record.student_id,
        subject_id: record.subject_id,
        exam_type: record.exam_type,
        marks_obtained: record.marks_obtained,
        max_marks: record.max_marks,
        recorded_at: record.recorded_at.to_rfc3339(),
    }
}

pub(crate) fn marks_summary_to_dto(summary: StudentMarksSummary) -> shared::StudentMarksSummary {
    shared::StudentMarksSummary {
        student_id: summary.student_id,
        marks: summary.marks.into_iter().map(mark_record_to_dto).collect(),
        total_obtained: summary.total_obtained,
        total_max: summary.total_max,
        percentage: summary.percentage,
        grade: summary.grade,
    }
}
