use crate::components::page_shell::PageShell;
use crate::state::use_app;
use chrono::Utc;
use dashboard_core::model::{Role, Team, User};
use dashboard_core::teams::{new_team_id, TeamDirectory, TeamDraft};
use dashboard_core::DataProvider;
use leptos::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Users,
    Teams,
}

fn parse_role(value: &str) -> Option<Role> {
    Role::ALL.into_iter().find(|role| role.label() == value)
}

fn manager_label(directory: &TeamDirectory, team: &Team) -> String {
    directory
        .user(&team.manager_id)
        .map_or_else(|| "Unassigned".to_string(), |u| u.name.clone())
}

#[component]
fn CreateTeamDialog(directory: RwSignal<TeamDirectory>, open: RwSignal<bool>) -> impl IntoView {
    let name = create_rw_signal(String::new());
    let description = create_rw_signal(String::new());
    let manager_id = create_rw_signal(String::new());

    let close = move || {
        name.set(String::new());
        description.set(String::new());
        manager_id.set(String::new());
        open.set(false);
    };
    let create = move |_| {
        let draft = TeamDraft {
            name: name.get_untracked(),
            description: description.get_untracked(),
            manager_id: manager_id.get_untracked(),
        };
        let created = directory
            .try_update(|d| d.create_team(draft, new_team_id(Utc::now())))
            .flatten();
        if created.is_some() {
            close();
        }
    };
    let candidates = move || {
        directory.with(|d| {
            d.manager_candidates()
                .into_iter()
                .map(|u| (u.id.clone(), u.name.clone()))
                .collect::<Vec<_>>()
        })
    };

    view! {
      <Show when=move || open.get()>
        <div class="modal-backdrop" on:click=move |_| close()>
          <div class="modal dialog" on:click=|ev| ev.stop_propagation()>
            <h2>"Create New Team"</h2>
            <label>"Team Name"</label>
            <input
              placeholder="e.g., Sales Team"
              prop:value=move || name.get()
              on:input=move |ev| name.set(event_target_value(&ev))
            />
            <label>"Description"</label>
            <input
              placeholder="Brief description"
              prop:value=move || description.get()
              on:input=move |ev| description.set(event_target_value(&ev))
            />
            <label>"Select Manager"</label>
            <select on:change=move |ev| manager_id.set(event_target_value(&ev))>
              <option value="" prop:selected=move || manager_id.with(String::is_empty)>
                "Choose a manager..."
              </option>
              {move || {
                  candidates()
                      .into_iter()
                      .map(|(id, label)| view! { <option value=id>{label}</option> })
                      .collect_view()
              }}
            </select>
            <div class="row">
              <button class="outline" on:click=move |_| close()>"Cancel"</button>
              <button
                class="primary"
                disabled=move || name.with(|n| n.trim().is_empty()) || manager_id.with(String::is_empty)
                on:click=create
              >
                "Create Team"
              </button>
            </div>
          </div>
        </div>
      </Show>
    }
}

#[component]
fn UsersTable(directory: RwSignal<TeamDirectory>) -> impl IntoView {
    let rows = move || directory.with(|d| d.users().to_vec());
    let teams = move || directory.with(|d| d.teams().to_vec());

    view! {
      <table class="users">
        <thead>
          <tr><th>"Name"</th><th>"Role"</th><th>"Teams"</th></tr>
        </thead>
        <tbody>
          <For
            each=rows
            key=|user: &User| user.id.clone()
            children=move |user: User| {
                let user_id = store_value(user.id.clone());
                let role = move || {
                    directory.with(|d| user_id.with_value(|id| d.user(id).map(|u| u.role)))
                };
                view! {
                  <tr>
                    <td>
                      <div>{user.name.clone()}</div>
                      <div class="meta">{user.email.clone()}</div>
                    </td>
                    <td>
                      <select on:change=move |ev| {
                          if let Some(role) = parse_role(&event_target_value(&ev)) {
                              user_id.with_value(|id| directory.update(|d| {
                                  d.change_role(id, role);
                              }));
                          }
                      }>
                        {Role::ALL
                          .into_iter()
                          .map(|option| view! {
                            <option
                              value=option.label()
                              prop:selected=move || role() == Some(option)
                            >
                              {option.label()}
                            </option>
                          })
                          .collect_view()}
                      </select>
                    </td>
                    <td class="memberships">
                      {move || {
                          teams()
                              .into_iter()
                              .map(|team: Team| {
                                  let team_id = team.id.clone();
                                  let member = user_id.with_value(|id| team.member_ids.contains(id));
                                  view! {
                                    <button
                                      class="chip"
                                      class:member=member
                                      on:click=move |_| {
                                          user_id.with_value(|id| directory.update(|d| {
                                              d.toggle_membership(id, &team_id);
                                          }));
                                      }
                                    >
                                      {team.name}
                                    </button>
                                  }
                              })
                              .collect_view()
                      }}
                    </td>
                  </tr>
                }
            }
          />
        </tbody>
      </table>
    }
}

#[component]
fn TeamsList(directory: RwSignal<TeamDirectory>) -> impl IntoView {
    let teams = move || directory.with(|d| d.teams().to_vec());

    view! {
      <div class="team-grid">
        <For
          each=teams
          key=|team: &Team| (team.id.clone(), team.member_ids.clone(), team.manager_id.clone())
          children=move |team: Team| {
              let team_id = team.id.clone();
              let (manager, members) = directory.with_untracked(|d| {
                  let manager = manager_label(d, &team);
                  let members = d.members_of(&team.id).into_iter().map(|u| u.name.clone()).collect::<Vec<_>>();
                  (manager, members)
              });
              view! {
                <article class="team-card">
                  <header>
                    <h3>{team.name}</h3>
                    <button
                      class="danger"
                      on:click=move |_| directory.update(|d| {
                          d.delete_team(&team_id);
                      })
                    >
                      "Delete"
                    </button>
                  </header>
                  <p>{team.description}</p>
                  <div class="meta">{format!("Manager: {manager}")}</div>
                  <ul>
                    {members.into_iter().map(|name| view! { <li>{name}</li> }).collect_view()}
                  </ul>
                </article>
              }
          }
        />
      </div>
    }
}

#[component]
pub fn TeamPage() -> impl IntoView {
    let app = use_app();
    let directory = create_rw_signal(TeamDirectory::new(
        app.provider.users(),
        app.provider.teams(),
    ));
    let tab = create_rw_signal(Tab::Users);
    let dialog_open = create_rw_signal(false);

    view! {
      <PageShell>
        <header class="team-header">
          <h1>"Team Management"</h1>
          <button class="primary" on:click=move |_| dialog_open.set(true)>"Create Team"</button>
        </header>
        <div class="tabs">
          <button class:active=move || tab.get() == Tab::Users on:click=move |_| tab.set(Tab::Users)>
            "All Users"
          </button>
          <button class:active=move || tab.get() == Tab::Teams on:click=move |_| tab.set(Tab::Teams)>
            "Teams"
          </button>
        </div>
        {move || match tab.get() {
            Tab::Users => view! { <UsersTable directory=directory/> }.into_view(),
            Tab::Teams => view! { <TeamsList directory=directory/> }.into_view(),
        }}
        <CreateTeamDialog directory=directory open=dialog_open/>
      </PageShell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::FixtureProvider;

    #[test]
    fn role_labels_parse_back() {
        for role in Role::ALL {
            assert_eq!(parse_role(role.label()), Some(role));
        }
        assert_eq!(parse_role("Owner"), None);
    }

    #[test]
    fn missing_manager_is_unassigned() {
        let provider = FixtureProvider::load().expect("load");
        let directory = TeamDirectory::new(provider.users(), provider.teams());
        let mut team = directory.teams()[0].clone();
        let manager = directory.user(&team.manager_id).expect("manager").name.clone();
        assert_eq!(manager_label(&directory, &team), manager);

        team.manager_id = "user_gone".into();
        assert_eq!(manager_label(&directory, &team), "Unassigned");
    }
}
