/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use entity::user::UserRole;

use super::types::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Permission {
    ViewJobs = 0,
    EditJobs = 1,
    ManageWorkflow = 2,
    ManageUsers = 3,
}

fn get_permission_bit(permissions: i64, permission: Permission) -> bool {
    permissions & (1 << permission as i64) != 0
}

fn set_permission_bit(permissions: i64, permission: Permission, value: bool) -> i64 {
    if value {
        permissions | (1 << permission as i64)
    } else {
        permissions & !(1 << permission as i64)
    }
}

fn permission_mask(permissions: &[Permission]) -> i64 {
    permissions
        .iter()
        .fold(0, |mask, p| set_permission_bit(mask, *p, true))
}

pub fn role_permissions(role: UserRole) -> i64 {
    match role {
        UserRole::Admin => 0x7FFFFFFFFFFFFFFF,
        UserRole::Manager => permission_mask(&[
            Permission::ViewJobs,
            Permission::EditJobs,
            Permission::ManageUsers,
        ]),
        UserRole::Staff => permission_mask(&[Permission::ViewJobs, Permission::EditJobs]),
    }
}

pub fn has_permission(user: &MUser, permission: Permission) -> bool {
    get_permission_bit(role_permissions(user.role), permission)
}

pub fn is_admin(user: &MUser) -> bool {
    user.role == UserRole::Admin
}
